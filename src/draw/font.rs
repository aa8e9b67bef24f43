//! Font descriptor for text annotations.

/// Font configuration for text rendering.
///
/// Shared by the pending-field preview and the committed raster text so both
/// measure and draw with the same face.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontDescriptor {
    /// Font family name (e.g., "Sans", "Monospace", "Inter")
    pub family: String,

    /// Font weight (e.g., "normal", "bold", "light" or numeric 100-900)
    pub weight: String,

    /// Font style (e.g., "normal", "italic", "oblique")
    pub style: String,
}

impl Default for FontDescriptor {
    fn default() -> Self {
        Self {
            family: "Sans".to_string(),
            weight: "normal".to_string(),
            style: "normal".to_string(),
        }
    }
}

impl FontDescriptor {
    pub fn new(family: String, weight: String, style: String) -> Self {
        Self {
            family,
            weight,
            style,
        }
    }

    /// Converts this descriptor to a Pango font description string.
    ///
    /// Format: "Family Style Weight Size", with normal style/weight omitted.
    /// Sizes are passed in pixels, so the string carries a `px` suffix.
    pub fn to_pango_string(&self, size: f64) -> String {
        let mut parts = vec![self.family.clone()];

        if !self.style.eq_ignore_ascii_case("normal") {
            parts.push(capitalize_first(&self.style));
        }

        if !self.weight.eq_ignore_ascii_case("normal") {
            parts.push(capitalize_first(&self.weight));
        }

        parts.push(format!("{}px", size.round() as i32));

        parts.join(" ")
    }

    pub fn to_pango(&self, size: f64) -> pango::FontDescription {
        pango::FontDescription::from_string(&self.to_pango_string(size))
    }
}

fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
    }
}
