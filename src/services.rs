pub mod auth;
pub use auth::AuthService;
pub mod client_service;
pub use client_service::ClientService;
pub mod product_service;
pub use product_service::ProductService;
pub mod quote_service;
pub use quote_service::QuoteService;
pub mod finance_service;
pub use finance_service::FinanceService;
pub mod document_service;
pub use document_service::DocumentService;
pub mod settings_service;
pub use settings_service::SettingsService;
pub mod pagination;
