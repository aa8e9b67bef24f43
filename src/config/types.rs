//! Configuration type definitions.

use super::enums::ColorSpec;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Drawing-related settings.
///
/// Style the engine starts with and falls back to when a control message
/// carries an unparseable color.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct DrawingConfig {
    /// Default pen color - a named color (red, green, blue, yellow, orange, pink, white, black),
    /// a hex string like `"#ff0000"`, or an RGB array like `[255, 0, 0]`
    #[serde(default = "default_color")]
    pub default_color: ColorSpec,

    /// Default stroke width in pixels (valid range: 1 - 50)
    #[serde(default = "default_stroke_width")]
    pub default_stroke_width: u32,
}

impl Default for DrawingConfig {
    fn default() -> Self {
        Self {
            default_color: default_color(),
            default_stroke_width: default_stroke_width(),
        }
    }
}

/// Undo/redo history settings.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct HistoryConfig {
    /// Number of snapshots kept before the oldest is dropped (valid range: 1 - 500).
    /// Each snapshot is a full-screen image, so memory grows linearly with this value.
    #[serde(default = "default_max_history")]
    pub max_history: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            max_history: default_max_history(),
        }
    }
}

/// Text annotation settings.
///
/// Font size is not configured here; it follows the stroke width.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct TextConfig {
    /// Font family name for text rendering (e.g., "Sans", "Monospace", "JetBrains Mono")
    /// Falls back to the Pango default if the family is not installed
    #[serde(default = "default_font_family")]
    pub font_family: String,

    /// Font weight (e.g., "normal", "bold", "light", 400, 700)
    /// Can be a named weight or a numeric value (100-900)
    #[serde(default = "default_font_weight")]
    pub font_weight: String,

    /// Font style (e.g., "normal", "italic", "oblique")
    #[serde(default = "default_font_style")]
    pub font_style: String,

    /// Milliseconds after a text field opens during which focus loss is ignored
    /// (valid range: 0 - 2000)
    #[serde(default = "default_settle_delay_ms")]
    pub settle_delay_ms: u64,

    /// Padding in pixels between highlighted text and its background
    #[serde(default = "default_highlight_padding")]
    pub highlight_padding: f64,

    /// Corner radius in pixels of the highlight background
    #[serde(default = "default_highlight_corner_radius")]
    pub highlight_corner_radius: f64,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            font_family: default_font_family(),
            font_weight: default_font_weight(),
            font_style: default_font_style(),
            settle_delay_ms: default_settle_delay_ms(),
            highlight_padding: default_highlight_padding(),
            highlight_corner_radius: default_highlight_corner_radius(),
        }
    }
}

/// Laser pointer appearance.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct PointerConfig {
    /// Dot radius in pixels (valid range: 2.0 - 100.0)
    #[serde(default = "default_pointer_radius")]
    pub radius: f64,

    /// Dot color [R, G, B, A] (0.0-1.0 range)
    #[serde(default = "default_pointer_color")]
    pub color: [f64; 4],
}

impl Default for PointerConfig {
    fn default() -> Self {
        Self {
            radius: default_pointer_radius(),
            color: default_pointer_color(),
        }
    }
}

// =============================================================================
// Default value functions
// =============================================================================

fn default_color() -> ColorSpec {
    ColorSpec::Name("#ff0000".to_string())
}

fn default_stroke_width() -> u32 {
    3
}

fn default_max_history() -> usize {
    crate::engine::DEFAULT_MAX_HISTORY
}

fn default_font_family() -> String {
    "Sans".to_string()
}

fn default_font_weight() -> String {
    "normal".to_string()
}

fn default_font_style() -> String {
    "normal".to_string()
}

fn default_settle_delay_ms() -> u64 {
    150
}

fn default_highlight_padding() -> f64 {
    6.0
}

fn default_highlight_corner_radius() -> f64 {
    4.0
}

fn default_pointer_radius() -> f64 {
    10.0
}

fn default_pointer_color() -> [f64; 4] {
    [1.0, 0.0, 0.0, 0.9]
}
