//! Configuration enum types.

use crate::draw::{Color, RED};
use log::warn;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Color specification - a named color, a hex string or RGB values.
///
/// # Examples
/// ```toml
/// # Named color
/// default_color = "red"
///
/// # Hex string, as sent by the toolbar
/// default_color = "#00aaff"
///
/// # Custom RGB color (0-255 per component)
/// default_color = [255, 128, 0]  # Orange
/// ```
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, JsonSchema)]
#[serde(untagged)]
pub enum ColorSpec {
    /// Named color (red, green, blue, yellow, orange, pink, white, black) or `#rrggbb`
    Name(String),
    /// RGB color as [red, green, blue] where each component is 0-255
    Rgb([u8; 3]),
}

impl ColorSpec {
    /// Converts the color specification to a [`Color`] struct.
    ///
    /// Strings starting with `#` are parsed as hex, anything else is looked up
    /// with `util::name_to_color()`. Unknown or malformed values default to red
    /// with a warning.
    pub fn to_color(&self) -> Color {
        match self {
            ColorSpec::Name(name) if name.trim_start().starts_with('#') => {
                Color::from_hex(name).unwrap_or_else(|err| {
                    warn!("Invalid color '{}' ({}), using red", name, err);
                    RED
                })
            }
            ColorSpec::Name(name) => crate::util::name_to_color(name).unwrap_or_else(|| {
                warn!("Unknown color '{}', using red", name);
                RED
            }),
            ColorSpec::Rgb([r, g, b]) => Color::from_rgb8(*r, *g, *b),
        }
    }
}
