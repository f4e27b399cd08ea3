pub mod client_repo;
pub use client_repo::ClientRepository;
pub mod product_repo;
pub use product_repo::ProductRepository;
pub mod quote_repo;
pub use quote_repo::QuoteRepository;
pub mod finance_repo;
pub use finance_repo::FinanceRepository;
pub mod settings_repo;
pub use settings_repo::SettingsRepository;
pub mod user_repo;
pub use user_repo::UserRepository;
