//! Drawing surfaces.
//!
//! A [`Surface`] is the rendering target of one pipeline. Layout, diagram
//! building and sequencing only talk to this capability trait, never to a
//! concrete rendering technology:
//!
//! - `create_*` turns geometry into a detached primitive,
//! - [`Surface::append`] attaches it and hands back an [`ElementId`],
//! - [`Surface::apply`] performs one visual [`Transition`] on an attached element,
//! - [`Surface::clear`] discards everything.
//!
//! Element ids are stamped with the surface's clear epoch, so a handle that
//! survived a clear is rejected with [`SurfaceError::StaleElement`] instead of
//! touching an unrelated element.

pub mod svg;

use std::fmt;

use thiserror::Error;

use cipherflow_core::geometry::{Bounds, Point};

use crate::model::PipelineKind;

pub use self::svg::{JournalEntry, SvgPrimitive, SvgSurface};

/// Handle to an element appended to a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementId {
    epoch: u32,
    index: u32,
}

impl ElementId {
    pub fn new(epoch: u32, index: u32) -> Self {
        Self { epoch, index }
    }

    /// The clear epoch this element was appended in.
    pub fn epoch(self) -> u32 {
        self.epoch
    }

    /// Position in the surface's append order.
    pub fn index(self) -> usize {
        self.index as usize
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}.{}", self.epoch, self.index)
    }
}

/// A one-way visual state change driven by the sequencer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Transition {
    /// Highlight a node shape.
    Activate,
    /// Fade in a hidden data label.
    Reveal,
    /// Draw a connecting edge.
    Draw,
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Activate => "activate",
            Self::Reveal => "reveal",
            Self::Draw => "draw",
        };
        f.write_str(name)
    }
}

/// Role of a text primitive within a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelRole {
    /// The step label, always visible.
    Primary,
    /// The step's data artifact, hidden until revealed.
    Data,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SurfaceError {
    #[error("element {0} was discarded by a surface clear")]
    StaleElement(ElementId),

    #[error("element {0} does not exist")]
    UnknownElement(ElementId),

    #[error("element {id} does not support the {transition} transition")]
    UnsupportedTransition { id: ElementId, transition: Transition },

    #[error("element {id} already received the {transition} transition")]
    AlreadyApplied { id: ElementId, transition: Transition },
}

/// Capability interface of a pipeline drawing target.
pub trait Surface {
    /// Technology-specific detached primitive.
    type Primitive;

    /// Creates a node shape occupying `bounds`, inactive.
    fn create_shape(&self, bounds: Bounds, kind: PipelineKind) -> Self::Primitive;

    /// Creates a text label anchored at `anchor` (baseline). Data labels
    /// start hidden.
    fn create_label(
        &self,
        anchor: Point,
        text: &str,
        role: LabelRole,
        kind: PipelineKind,
    ) -> Self::Primitive;

    /// Creates an undrawn edge from `from` to `to`.
    fn create_edge(&self, from: Point, to: Point, kind: PipelineKind) -> Self::Primitive;

    /// Attaches a primitive, returning its handle. Append order is preserved.
    fn append(&mut self, primitive: Self::Primitive) -> ElementId;

    /// Applies a visual transition to an attached element.
    ///
    /// # Errors
    ///
    /// Fails if the element is stale or unknown, if the transition does not
    /// fit the element type, or if it was already applied.
    fn apply(&mut self, id: ElementId, transition: Transition) -> Result<(), SurfaceError>;

    /// Discards every element and invalidates all outstanding handles.
    fn clear(&mut self);

    /// Number of attached elements.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
