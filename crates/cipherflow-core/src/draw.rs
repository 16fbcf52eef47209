//! Drawable components for pipeline diagram rendering.
//!
//! All drawable components implement the [`Drawable`] trait, which provides a
//! consistent interface for rendering to layered SVG output and reporting size.
//! Drawables are stateless descriptions: animation state lives with whoever
//! owns them and is expressed here only as CSS classes.

mod connector;
mod layer;
mod rectangle;
mod stroke;
mod text;

pub use connector::Connector;
pub use layer::{LayeredOutput, RenderLayer, SvgNode};
pub use rectangle::Rectangle;
pub use stroke::{LineCap, StrokeDefinition};
pub use text::{Text, TextAnchor, TextDefinition};

use crate::geometry::{Point, Size};

/// Anything that can render itself to SVG at a given position.
pub trait Drawable: std::fmt::Debug {
    /// Renders the drawable with `position` as its reference point.
    ///
    /// Each drawable documents what its reference point means (center,
    /// baseline anchor, ...).
    fn render_to_layers(&self, position: Point) -> LayeredOutput;

    /// The footprint of the drawable.
    fn size(&self) -> Size;
}
