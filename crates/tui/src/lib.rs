pub mod cli;
pub mod commands;
pub mod config;
pub mod logging;
pub mod tui;

pub use brain_core as core;
pub use brain_core::database as db;
pub use brain_core::model;
pub use brain_core::shell;

pub use brain_core::AppConfig;
