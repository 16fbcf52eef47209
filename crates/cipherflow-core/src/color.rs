//! Color handling backed by the [`color`] crate.

use std::{fmt, str::FromStr};

use color::DynamicColor;

/// A CSS color as accepted in config files (`"#27ae60"`, `"rgb(...)"`, `"white"`).
///
/// Displays back as a CSS string, which is what SVG attributes expect.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Color {
    color: DynamicColor,
}

impl Color {
    /// Parses a CSS color string.
    ///
    /// # Errors
    ///
    /// The message names the rejected input.
    pub fn new(css: &str) -> Result<Self, String> {
        DynamicColor::from_str(css)
            .map(|color| Self { color })
            .map_err(|err| format!("Invalid color '{css}': {err}"))
    }

    /// Opacity in `0.0..=1.0`.
    pub fn alpha(&self) -> f32 {
        self.color.components[3]
    }

    pub fn with_alpha(self, alpha: f32) -> Self {
        Self {
            color: self.color.with_alpha(alpha),
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self {
            color: DynamicColor::from_alpha_color(color::palette::css::BLACK),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.color)
    }
}

impl From<Color> for svg::node::Value {
    fn from(color: Color) -> Self {
        svg::node::Value::from(color.to_string())
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    #[test]
    fn test_parse_named_and_hex_colors() {
        assert!(Color::new("red").is_ok());
        assert!(Color::new("#27ae60").is_ok());
        assert!(Color::new("rgb(10, 20, 30)").is_ok());
    }

    #[test]
    fn test_invalid_color_reports_input() {
        let err = Color::new("definitely-not-a-color").unwrap_err();
        assert!(err.contains("definitely-not-a-color"));
    }

    #[test]
    fn test_alpha() {
        let opaque = Color::new("blue").unwrap();
        assert_approx_eq!(f32, opaque.alpha(), 1.0);

        let faded = opaque.with_alpha(0.25);
        assert_approx_eq!(f32, faded.alpha(), 0.25);
    }

    #[test]
    fn test_display_is_css() {
        let css = Color::new("#27ae60").unwrap().to_string();
        assert_eq!(Color::new(&css).unwrap(), Color::new("#27ae60").unwrap());
    }
}
