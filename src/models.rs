pub mod auth;
pub mod client;
pub mod finance;
pub mod product;
pub mod quote;
pub mod settings;
