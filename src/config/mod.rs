//! Configuration file support for scrawl.
//!
//! This module handles loading and validating user settings from the configuration file
//! located at `~/.config/scrawl/config.toml`. Settings include the default style,
//! history depth, text appearance, the laser pointer and keyboard shortcuts.
//!
//! If no config file exists, sensible defaults are used automatically.

pub mod enums;
pub mod keybindings;
pub mod types;

// Re-export commonly used types at module level
pub use enums::ColorSpec;
pub use keybindings::{Action, ActionMap, KeyBinding, KeybindingsConfig};
pub use types::{DrawingConfig, HistoryConfig, PointerConfig, TextConfig};

use crate::draw::{Color, FontDescriptor};
use anyhow::{Context, Result};
use log::{debug, info};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main configuration structure containing all user settings.
///
/// This is the root configuration type that gets deserialized from the TOML file.
/// All fields have sensible defaults and will use those if not specified in the config file.
///
/// # Example TOML
/// ```toml
/// [drawing]
/// default_color = "#ff0000"
/// default_stroke_width = 3
///
/// [history]
/// max_history = 50
///
/// [text]
/// font_family = "Sans"
/// settle_delay_ms = 150
///
/// [pointer]
/// radius = 10.0
/// color = [1.0, 0.0, 0.0, 0.9]
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, JsonSchema)]
pub struct Config {
    /// Default style (color, stroke width)
    #[serde(default)]
    pub drawing: DrawingConfig,

    /// Undo/redo depth
    #[serde(default)]
    pub history: HistoryConfig,

    /// Text annotation font and highlight appearance
    #[serde(default)]
    pub text: TextConfig,

    /// Laser pointer appearance
    #[serde(default)]
    pub pointer: PointerConfig,

    /// Keyboard shortcuts
    #[serde(default)]
    pub keybindings: KeybindingsConfig,
}

impl Config {
    /// Validates and clamps all configuration values to acceptable ranges.
    ///
    /// Invalid values are clamped to the nearest valid value and a warning is logged.
    ///
    /// Validated ranges:
    /// - `default_stroke_width`: 1 - 50
    /// - `max_history`: 1 - 500
    /// - `settle_delay_ms`: 0 - 2000
    /// - `highlight_padding`, `highlight_corner_radius`: 0.0 - 50.0
    /// - `pointer.radius`: 2.0 - 100.0
    pub fn validate_and_clamp(&mut self) {
        if !(1..=50).contains(&self.drawing.default_stroke_width) {
            log::warn!(
                "Invalid default_stroke_width {}, clamping to 1-50 range",
                self.drawing.default_stroke_width
            );
            self.drawing.default_stroke_width = self.drawing.default_stroke_width.clamp(1, 50);
        }

        if !(1..=500).contains(&self.history.max_history) {
            log::warn!(
                "Invalid max_history {}, clamping to 1-500 range",
                self.history.max_history
            );
            self.history.max_history = self.history.max_history.clamp(1, 500);
        }

        if self.text.settle_delay_ms > 2000 {
            log::warn!(
                "Invalid settle_delay_ms {}, clamping to 0-2000 range",
                self.text.settle_delay_ms
            );
            self.text.settle_delay_ms = 2000;
        }

        // NaN fails the range check too and is replaced by the lower bound
        for (name, value) in [
            ("highlight_padding", &mut self.text.highlight_padding),
            (
                "highlight_corner_radius",
                &mut self.text.highlight_corner_radius,
            ),
        ] {
            if !(0.0..=50.0).contains(&*value) {
                log::warn!("Invalid {} {:.1}, clamping to 0.0-50.0 range", name, value);
                *value = if value.is_nan() {
                    0.0
                } else {
                    value.clamp(0.0, 50.0)
                };
            }
        }

        if !(2.0..=100.0).contains(&self.pointer.radius) {
            log::warn!(
                "Invalid pointer radius {:.1}, clamping to 2.0-100.0 range",
                self.pointer.radius
            );
            self.pointer.radius = if self.pointer.radius.is_nan() {
                2.0
            } else {
                self.pointer.radius.clamp(2.0, 100.0)
            };
        }

        for i in 0..4 {
            if !(0.0..=1.0).contains(&self.pointer.color[i]) {
                log::warn!(
                    "Invalid pointer color[{}] = {:.3}, clamping to 0.0-1.0",
                    i,
                    self.pointer.color[i]
                );
                self.pointer.color[i] = if self.pointer.color[i].is_nan() {
                    1.0
                } else {
                    self.pointer.color[i].clamp(0.0, 1.0)
                };
            }
        }

        // Validate font weight is reasonable
        let valid_weight = matches!(
            self.text.font_weight.to_lowercase().as_str(),
            "normal" | "bold" | "light" | "ultralight" | "heavy" | "ultrabold"
        ) || self
            .text
            .font_weight
            .parse::<u32>()
            .is_ok_and(|w| (100..=900).contains(&w));

        if !valid_weight {
            log::warn!(
                "Invalid font_weight '{}', falling back to 'normal'",
                self.text.font_weight
            );
            self.text.font_weight = "normal".to_string();
        }

        if !matches!(
            self.text.font_style.to_lowercase().as_str(),
            "normal" | "italic" | "oblique"
        ) {
            log::warn!(
                "Invalid font_style '{}', falling back to 'normal'",
                self.text.font_style
            );
            self.text.font_style = "normal".to_string();
        }

        if self.text.font_family.trim().is_empty() {
            log::warn!("Empty font_family, falling back to 'Sans'");
            self.text.font_family = "Sans".to_string();
        }
    }

    /// Default drawing color as a [`Color`].
    pub fn default_color(&self) -> Color {
        self.drawing.default_color.to_color()
    }

    /// Font used for text annotations.
    pub fn font_descriptor(&self) -> FontDescriptor {
        FontDescriptor::new(
            self.text.font_family.clone(),
            self.text.font_weight.clone(),
            self.text.font_style.clone(),
        )
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.text.settle_delay_ms)
    }

    pub fn pointer_color(&self) -> Color {
        let [r, g, b, a] = self.pointer.color;
        Color::new(r, g, b, a)
    }

    /// JSON schema describing the config file, for editor tooling.
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Config)
    }

    /// Returns the path to the configuration file.
    ///
    /// The config file is located at `~/.config/scrawl/config.toml`.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined (e.g., HOME not set).
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("scrawl");

        Ok(config_dir.join("config.toml"))
    }

    /// Loads configuration from the default location, or returns defaults if not found.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The config directory path cannot be determined
    /// - The file exists but cannot be read
    /// - The file exists but contains invalid TOML syntax
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;

        if !config_path.exists() {
            info!("Config file not found, using defaults");
            debug!("Expected config at: {}", config_path.display());
            return Ok(Self::default());
        }

        Self::load_from(&config_path)
    }

    /// Loads and validates configuration from an explicit path.
    ///
    /// Unlike [`Config::load`], a missing file is an error.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        let config_str = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config from {}", config_path.display()))?;

        let mut config: Config = toml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config from {}", config_path.display()))?;

        // Validate and clamp values to acceptable ranges
        config.validate_and_clamp();

        // Surface keybinding mistakes at load time rather than on first key press
        config
            .keybindings
            .build_action_map()
            .map_err(anyhow::Error::msg)
            .with_context(|| format!("Invalid keybindings in {}", config_path.display()))?;

        info!("Loaded config from {}", config_path.display());
        debug!("Config: {:?}", config);

        Ok(config)
    }
}
