//! Core application functionality
//!
//! This module contains the core application logic, including:
//! - Application initialization and configuration
//! - Design-session state management
//! - Settings and CLI handling

pub mod app;
pub mod cli;
pub mod config_file;
pub mod settings;
pub mod state;

// Re-export commonly used items
pub use app::create_app;
pub use cli::CliArgs;
pub use config_file::ConfigFile;
pub use settings::WardoSettings;
pub use state::{DesignSession, PlacedUnit, UnitId};
