//! Straight connector between two points.

use svg::node::element::{self as svg_element, path::Data};

use crate::{
    apply_stroke,
    draw::{Drawable, LayeredOutput, RenderLayer, StrokeDefinition},
    geometry::{Point, Size},
};

/// A straight line segment drawn as an SVG `<path>`.
///
/// The endpoints are absolute; the render position is treated as an offset
/// applied to both of them.
#[derive(Debug, Clone)]
pub struct Connector {
    from: Point,
    to: Point,
    stroke: StrokeDefinition,
    class: Option<String>,
    dash_drawn: bool,
}

impl Connector {
    pub fn new(from: Point, to: Point) -> Self {
        Self {
            from,
            to,
            stroke: StrokeDefinition::default(),
            class: None,
            dash_drawn: false,
        }
    }

    pub fn with_stroke(mut self, stroke: StrokeDefinition) -> Self {
        self.stroke = stroke;
        self
    }

    /// Sets the CSS class emitted on the `<path>` element.
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    /// Hides the line behind a single dash as long as the segment.
    ///
    /// A stylesheet rule resetting `stroke-dashoffset` to zero then draws it.
    pub fn with_dash_draw(mut self) -> Self {
        self.dash_drawn = true;
        self
    }

    pub fn from(&self) -> Point {
        self.from
    }

    pub fn to(&self) -> Point {
        self.to
    }

    /// Length of the segment.
    pub fn length(&self) -> f32 {
        self.to.sub_point(self.from).hypot()
    }
}

impl Drawable for Connector {
    fn render_to_layers(&self, position: Point) -> LayeredOutput {
        let from = self.from.add_point(position);
        let to = self.to.add_point(position);

        let data = Data::new()
            .move_to((from.x(), from.y()))
            .line_to((to.x(), to.y()));

        let mut path = svg_element::Path::new().set("d", data).set("fill", "none");
        path = apply_stroke!(path, &self.stroke);

        if self.dash_drawn {
            let length = self.length();
            path = path
                .set("stroke-dasharray", length)
                .set("stroke-dashoffset", length);
        }

        if let Some(class) = &self.class {
            path = path.set("class", class.as_str());
        }

        let mut output = LayeredOutput::new();
        output.add_to_layer(RenderLayer::Edge, Box::new(path));
        output
    }

    fn size(&self) -> Size {
        let delta = self.to.sub_point(self.from);
        Size::new(delta.x().abs(), delta.y().abs())
    }
}
