//! Text rendering definitions for step labels and data labels.
//!
//! Widths are estimated from the character count; there is no font shaping.
//!
//! ```
//! # use std::rc::Rc;
//! # use cipherflow_core::draw::{TextDefinition, Text};
//! let mut style = TextDefinition::new();
//! style.set_font_family("Helvetica");
//! style.set_font_size(14);
//!
//! let text = Text::new(Rc::new(style), "Derive shared secret");
//! assert!(text.estimated_width() > 0.0);
//! ```

use std::rc::Rc;

use svg::node::element as svg_element;

use crate::{
    color::Color,
    draw::{Drawable, LayeredOutput, RenderLayer},
    geometry::{Point, Size},
};

/// Average glyph advance as a fraction of the font size.
const GLYPH_WIDTH_RATIO: f32 = 0.6;

/// Line height as a multiple of the font size.
const LINE_HEIGHT_RATIO: f32 = 1.2;

/// Which part of the text sits on the x coordinate.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    #[default]
    Start,
    Middle,
}

impl TextAnchor {
    pub fn to_svg_value(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Middle => "middle",
        }
    }
}

/// Font, fill and anchoring shared by many labels.
///
/// Defaults to 14px sans-serif, start-anchored, with no explicit fill.
#[derive(Debug, Clone)]
pub struct TextDefinition {
    font_family: String,
    font_size: u16,
    color: Option<Color>,
    anchor: TextAnchor,
}

impl TextDefinition {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn anchor(&self) -> TextAnchor {
        self.anchor
    }

    pub fn set_font_family(&mut self, family: &str) {
        self.font_family = family.to_string();
    }

    pub fn set_font_size(&mut self, size: u16) {
        self.font_size = size;
    }

    pub fn set_color(&mut self, color: Option<Color>) {
        self.color = color;
    }

    pub fn set_anchor(&mut self, anchor: TextAnchor) {
        self.anchor = anchor;
    }
}

impl Default for TextDefinition {
    fn default() -> Self {
        Self {
            font_family: String::from("sans-serif"),
            font_size: 14,
            color: None,
            anchor: TextAnchor::default(),
        }
    }
}

/// A text element: content plus a shared style.
///
/// The render position is the anchor point on the text baseline.
#[derive(Debug, Clone)]
pub struct Text {
    definition: Rc<TextDefinition>,
    content: String,
    class: Option<String>,
}

impl Text {
    pub fn new(definition: Rc<TextDefinition>, content: impl Into<String>) -> Self {
        Self {
            definition,
            content: content.into(),
            class: None,
        }
    }

    /// Sets the CSS class emitted on the `<text>` element (builder style).
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    /// Approximate rendered width without font shaping.
    pub fn estimated_width(&self) -> f32 {
        self.content.chars().count() as f32 * f32::from(self.definition.font_size) * GLYPH_WIDTH_RATIO
    }
}

impl Drawable for Text {
    fn render_to_layers(&self, position: Point) -> LayeredOutput {
        let mut element = svg_element::Text::new(self.content.as_str())
            .set("x", position.x())
            .set("y", position.y())
            .set("font-family", self.definition.font_family.as_str())
            .set("font-size", self.definition.font_size)
            .set("text-anchor", self.definition.anchor.to_svg_value());

        if let Some(color) = self.definition.color {
            element = element.set("fill", color);
        }
        if let Some(class) = &self.class {
            element = element.set("class", class.as_str());
        }

        let mut output = LayeredOutput::new();
        output.add_to_layer(RenderLayer::Text, Box::new(element));
        output
    }

    fn size(&self) -> Size {
        Size::new(
            self.estimated_width(),
            f32::from(self.definition.font_size) * LINE_HEIGHT_RATIO,
        )
    }
}
