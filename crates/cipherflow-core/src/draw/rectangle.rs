//! Rounded rectangle used for pipeline step nodes.

use svg::node::element as svg_element;

use crate::{
    apply_stroke,
    color::Color,
    draw::{Drawable, LayeredOutput, RenderLayer, StrokeDefinition},
    geometry::{Point, Size},
};

/// A fixed-size rectangle with optional rounded corners.
///
/// The render position is the center of the rectangle.
#[derive(Debug, Clone)]
pub struct Rectangle {
    size: Size,
    rounded: f32,
    fill: Option<Color>,
    stroke: StrokeDefinition,
    class: Option<String>,
}

impl Rectangle {
    pub fn new(size: Size) -> Self {
        Self {
            size,
            rounded: 0.0,
            fill: None,
            stroke: StrokeDefinition::default(),
            class: None,
        }
    }

    /// Sets the corner radius (builder style).
    pub fn with_rounded(mut self, radius: f32) -> Self {
        self.rounded = radius;
        self
    }

    /// Sets the fill color; `None` renders an unfilled box.
    pub fn with_fill(mut self, fill: Option<Color>) -> Self {
        self.fill = fill;
        self
    }

    pub fn with_stroke(mut self, stroke: StrokeDefinition) -> Self {
        self.stroke = stroke;
        self
    }

    /// Sets the CSS class emitted on the `<rect>` element.
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }
}

impl Drawable for Rectangle {
    fn render_to_layers(&self, position: Point) -> LayeredOutput {
        let bounds = position.to_bounds(self.size);

        let mut rect = svg_element::Rectangle::new()
            .set("x", bounds.min_x())
            .set("y", bounds.min_y())
            .set("width", self.size.width())
            .set("height", self.size.height())
            .set("rx", self.rounded);

        rect = match self.fill {
            Some(fill) => rect
                .set("fill", fill.to_string())
                .set("fill-opacity", fill.alpha()),
            None => rect.set("fill", "none"),
        };
        rect = apply_stroke!(rect, &self.stroke);

        if let Some(class) = &self.class {
            rect = rect.set("class", class.as_str());
        }

        let mut output = LayeredOutput::new();
        output.add_to_layer(RenderLayer::Node, Box::new(rect));
        output
    }

    fn size(&self) -> Size {
        self.size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(rect: &Rectangle, position: Point) -> String {
        rect.render_to_layers(position)
            .render()
            .iter()
            .map(|n| n.to_string())
            .collect()
    }

    #[test]
    fn test_rectangle_is_centered_on_position() {
        let rect = Rectangle::new(Size::new(220.0, 50.0)).with_rounded(10.0);
        let svg = render(&rect, Point::new(150.0, 75.0));

        assert!(svg.contains("x=\"40\""));
        assert!(svg.contains("y=\"50\""));
        assert!(svg.contains("rx=\"10\""));
    }

    #[test]
    fn test_unfilled_rectangle() {
        let rect = Rectangle::new(Size::new(10.0, 10.0));
        assert!(render(&rect, Point::default()).contains("fill=\"none\""));
    }

    #[test]
    fn test_class_is_emitted() {
        let rect = Rectangle::new(Size::new(10.0, 10.0)).with_class("node active");
        assert!(render(&rect, Point::default()).contains("class=\"node active\""));
    }
}
