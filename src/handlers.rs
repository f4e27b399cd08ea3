pub mod auth;
pub mod clients;
pub mod documents;
pub mod finance;
pub mod products;
pub mod quotes;
pub mod settings;
