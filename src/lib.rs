pub use brain_tui::cli;
pub use brain_tui::commands;
pub use brain_tui::config;
pub use brain_tui::logging;
pub use brain_tui::tui;
pub use brain_tui::AppConfig;

pub use brain_core as core;
pub use brain_core::database as db;
pub use brain_core::gateway;
pub use brain_core::model;
pub use brain_core::shell;
