pub mod config;
pub mod database;
pub mod gateway;
pub mod model;
pub mod scanner;
pub mod services;
pub mod shell;

pub use config::AppConfig;
pub use database::Database;
pub use gateway::{CommandGateway, GatewayError, LocalGateway};
pub use model::*;
pub use services::VaultService;
