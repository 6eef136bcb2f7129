//! Configuration for isokit
//!
//! Supports JSON and TOML files, chosen by file extension, stored by
//! default in the platform configuration directory.
//!
//! Configuration is organized into sections:
//! - Canvas size
//! - Rendering preferences (anchor visibility and marker radius)
//! - Label layout tunables
//! - Library storage locations
//! - Undo history depth

use std::path::{Path, PathBuf};

use isokit_core::CanvasSize;
use isokit_designer::{LabelLayoutOptions, LayoutStrategy};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SettingsError};

/// Directory name under the platform config directory
const APP_DIR: &str = "isokit";

/// Canvas settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasSettings {
    /// Canvas width in pixels
    pub width: f64,
    /// Canvas height in pixels
    pub height: f64,
}

impl Default for CanvasSettings {
    fn default() -> Self {
        Self {
            width: 1200.0,
            height: 800.0,
        }
    }
}

/// Rendering preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderingSettings {
    /// Show anchor markers in compiled output
    pub show_anchors: bool,
    /// Radius of re-injected aggregated anchor markers
    pub anchor_radius: f64,
}

impl Default for RenderingSettings {
    fn default() -> Self {
        Self {
            show_anchors: false,
            anchor_radius: 2.0,
        }
    }
}

/// Label layout settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutSettings {
    pub strategy: LayoutStrategy,
    /// Gap between the diagram outline and the labels
    pub placement_distance: f64,
    pub min_spacing: f64,
    pub min_spacing_x: f64,
    pub min_spacing_y: f64,
    pub max_adjust_attempts: usize,
    /// Degrees
    pub smoothing_angle: f64,
    pub smoothing_step: f64,
    pub concavity: f64,
    pub label_max_width: f64,
    pub font_size: f64,
    pub line_height: f64,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        let options = LabelLayoutOptions::default();
        Self {
            strategy: options.strategy,
            placement_distance: options.placement_distance,
            min_spacing: options.min_spacing,
            min_spacing_x: options.min_spacing_x,
            min_spacing_y: options.min_spacing_y,
            max_adjust_attempts: options.max_adjust_attempts,
            smoothing_angle: options.smoothing_angle,
            smoothing_step: options.smoothing_step,
            concavity: options.concavity,
            label_max_width: options.label_max_width,
            font_size: options.font_size,
            line_height: options.line_height,
        }
    }
}

/// Library storage locations. Unset paths fall back to the platform
/// config directory.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    pub component_library_path: Option<PathBuf>,
    pub shape_library_path: Option<PathBuf>,
}

/// Undo history settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistorySettings {
    /// Maximum number of undo snapshots
    pub max_depth: usize,
}

impl Default for HistorySettings {
    fn default() -> Self {
        Self { max_depth: 100 }
    }
}

/// Complete application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub canvas: CanvasSettings,
    pub rendering: RenderingSettings,
    pub layout: LayoutSettings,
    pub storage: StorageSettings,
    pub history: HistorySettings,
}

enum Format {
    Json,
    Toml,
}

fn format_of(path: &Path) -> Result<Format> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => Ok(Format::Json),
        Some("toml") => Ok(Format::Toml),
        _ => Err(SettingsError::UnsupportedFormat(format!(
            "{} (config file must be .json or .toml)",
            path.display()
        ))),
    }
}

/// Platform directory holding isokit's configuration and libraries.
pub fn default_config_dir() -> Result<PathBuf> {
    dirs::config_dir()
        .map(|dir| dir.join(APP_DIR))
        .ok_or_else(|| SettingsError::ConfigDirectory("No platform config directory".to_string()))
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let format = format_of(path)?;
        let content = std::fs::read_to_string(path)?;
        let config: Self = match format {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };
        config.validate()?;
        tracing::debug!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Load config from file, falling back to defaults when the file does
    /// not exist.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            tracing::info!(path = %path.display(), "No configuration file, using defaults");
            Ok(Self::default())
        }
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        self.validate()?;
        let content = match format_of(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.canvas.width <= 0.0 || self.canvas.height <= 0.0 {
            return Err(SettingsError::invalid("canvas", "dimensions must be > 0"));
        }
        if self.rendering.anchor_radius < 0.0 {
            return Err(SettingsError::invalid("rendering.anchor_radius", "must be >= 0"));
        }

        let layout = &self.layout;
        let positive = [
            ("layout.placement_distance", layout.placement_distance),
            ("layout.min_spacing", layout.min_spacing),
            ("layout.min_spacing_x", layout.min_spacing_x),
            ("layout.min_spacing_y", layout.min_spacing_y),
            ("layout.smoothing_step", layout.smoothing_step),
            ("layout.concavity", layout.concavity),
            ("layout.label_max_width", layout.label_max_width),
            ("layout.font_size", layout.font_size),
            ("layout.line_height", layout.line_height),
        ];
        if let Some((key, _)) = positive.iter().find(|(_, value)| *value <= 0.0) {
            return Err(SettingsError::invalid(key, "must be > 0"));
        }
        if layout.max_adjust_attempts == 0 {
            return Err(SettingsError::invalid("layout.max_adjust_attempts", "must be > 0"));
        }
        if !(0.0..=180.0).contains(&layout.smoothing_angle) {
            return Err(SettingsError::invalid(
                "layout.smoothing_angle",
                "must be between 0 and 180 degrees",
            ));
        }

        if self.history.max_depth == 0 {
            return Err(SettingsError::invalid("history.max_depth", "must be > 0"));
        }
        Ok(())
    }

    pub fn canvas_size(&self) -> CanvasSize {
        CanvasSize::new(self.canvas.width, self.canvas.height)
    }

    /// The layout section as designer options.
    pub fn to_layout_options(&self) -> LabelLayoutOptions {
        let layout = &self.layout;
        LabelLayoutOptions {
            strategy: layout.strategy,
            placement_distance: layout.placement_distance,
            min_spacing: layout.min_spacing,
            min_spacing_x: layout.min_spacing_x,
            min_spacing_y: layout.min_spacing_y,
            max_adjust_attempts: layout.max_adjust_attempts,
            smoothing_angle: layout.smoothing_angle,
            smoothing_step: layout.smoothing_step,
            concavity: layout.concavity,
            label_max_width: layout.label_max_width,
            font_size: layout.font_size,
            line_height: layout.line_height,
        }
    }

    /// Component library file, configured or under the config directory.
    pub fn component_library_path(&self) -> Result<PathBuf> {
        match &self.storage.component_library_path {
            Some(path) => Ok(path.clone()),
            None => Ok(default_config_dir()?.join("components.json")),
        }
    }

    /// Shape library index, configured or under the config directory.
    pub fn shape_library_path(&self) -> Result<PathBuf> {
        match &self.storage.shape_library_path {
            Some(path) => Ok(path.clone()),
            None => Ok(default_config_dir()?.join("shapes").join("index.json")),
        }
    }
}
