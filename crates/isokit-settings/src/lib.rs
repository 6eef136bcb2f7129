//! isokit Settings Crate
//!
//! Handles application configuration: canvas, rendering, label layout,
//! library storage locations and undo history depth.

pub mod config;
pub mod error;

pub use config::{
    default_config_dir, CanvasSettings, Config, HistorySettings, LayoutSettings,
    RenderingSettings, StorageSettings,
};
pub use error::{Result, SettingsError};
