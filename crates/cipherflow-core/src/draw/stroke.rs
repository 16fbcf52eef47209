//! Outline attributes for node boxes and edges.
//!
//! Strokes carry no dash pattern; edges are drawn by the CSS dash animation
//! attached to their class.
//!
//! ```
//! use cipherflow_core::draw::{LineCap, StrokeDefinition};
//! use cipherflow_core::color::Color;
//! use svg::node::element as svg_element;
//!
//! let stroke = StrokeDefinition::new(Color::new("#27ae60").unwrap(), 2.0).with_cap(LineCap::Round);
//! let path = svg_element::Path::new().set("d", "M 150 100 L 150 130");
//! let path = cipherflow_core::apply_stroke!(path, &stroke);
//! ```

use crate::color::Color;

/// Shape of open line ends.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum LineCap {
    #[default]
    Butt,
    Round,
}

impl LineCap {
    /// Returns the SVG `stroke-linecap` value
    pub fn to_svg_value(self) -> &'static str {
        match self {
            Self::Butt => "butt",
            Self::Round => "round",
        }
    }
}

/// Color, width and cap of an outline.
#[derive(Debug, Clone, PartialEq)]
pub struct StrokeDefinition {
    color: Color,
    width: f32,
    cap: LineCap,
}

impl StrokeDefinition {
    pub fn new(color: Color, width: f32) -> Self {
        Self {
            color,
            width,
            cap: LineCap::default(),
        }
    }

    /// Sets the line cap (builder style).
    pub fn with_cap(mut self, cap: LineCap) -> Self {
        self.cap = cap;
        self
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn cap(&self) -> LineCap {
        self.cap
    }
}

impl Default for StrokeDefinition {
    fn default() -> Self {
        Self::new(Color::default(), 1.0)
    }
}

/// Sets `stroke`, `stroke-width` and `stroke-linecap` on an SVG element.
///
/// `stroke-opacity` is only emitted for translucent colors.
#[macro_export]
macro_rules! apply_stroke {
    ($element:expr, $stroke:expr) => {{
        let stroke = $stroke;
        let mut elem = $element
            .set("stroke", stroke.color().to_string())
            .set("stroke-width", stroke.width())
            .set("stroke-linecap", stroke.cap().to_svg_value());

        if stroke.color().alpha() < 1.0 {
            elem = elem.set("stroke-opacity", stroke.color().alpha());
        }

        elem
    }};
}

#[cfg(test)]
mod tests {
    use svg::node::element::Path;

    use super::*;

    #[test]
    fn test_default_is_thin_butt_line() {
        let stroke = StrokeDefinition::default();

        assert_eq!(stroke.width(), 1.0);
        assert_eq!(stroke.cap(), LineCap::Butt);
    }

    #[test]
    fn test_with_cap() {
        let stroke = StrokeDefinition::new(Color::default(), 2.0).with_cap(LineCap::Round);
        assert_eq!(stroke.cap().to_svg_value(), "round");
    }

    #[test]
    fn test_opaque_stroke_omits_opacity() {
        let stroke = StrokeDefinition::new(Color::new("#e67e22").unwrap(), 2.0);
        let path = crate::apply_stroke!(Path::new(), &stroke).to_string();

        assert!(path.contains("stroke-width=\"2\""));
        assert!(!path.contains("stroke-opacity"));
    }

    #[test]
    fn test_translucent_stroke_sets_opacity() {
        let color = Color::new("#e67e22").unwrap().with_alpha(0.5);
        let path = crate::apply_stroke!(Path::new(), &StrokeDefinition::new(color, 2.0)).to_string();

        assert!(path.contains("stroke-opacity=\"0.5\""));
    }
}
