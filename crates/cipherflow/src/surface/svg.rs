//! Retained-mode SVG surface.
//!
//! [`SvgSurface`] keeps its primitives in append order together with a journal
//! of every transition applied since the last clear. The journal lets callers
//! render the diagram as it looked after any number of transitions, which is
//! how animation frames are exported.

use std::{rc::Rc, time::Duration};

use ::svg::{Document, node::element as svg_element};
use log::{debug, trace};
use tokio::time::Instant;

use cipherflow_core::{
    draw::{
        Connector, Drawable, LayeredOutput, LineCap, Rectangle, RenderLayer,
        StrokeDefinition, Text, TextAnchor, TextDefinition,
    },
    geometry::{Bounds, Point, Size},
};

use super::{ElementId, LabelRole, Surface, SurfaceError, Transition};
use crate::{config::Palette, model::PipelineKind};

/// Margin around the content when sizing the document.
const DOCUMENT_MARGIN: f32 = 20.0;

/// Corner radius of node boxes.
const NODE_CORNER_RADIUS: f32 = 10.0;

/// Fill opacity of an active node.
const ACTIVE_FILL_ALPHA: f32 = 0.2;

/// Presentation classes mirror the state flags so that a browser viewing an
/// exported frame shows the same state.
const STYLESHEET: &str = "\
.node { transition: fill-opacity 0.4s ease; }
.node-text { pointer-events: none; }
.data-label.hidden { opacity: 0; }
.data-label.fade-in { opacity: 1; transition: opacity 0.6s ease-in; }
.edge.animate { stroke-dashoffset: 0; transition: stroke-dashoffset 0.8s linear; }
";

/// A primitive owned by an [`SvgSurface`].
#[derive(Debug, Clone, PartialEq)]
pub enum SvgPrimitive {
    Shape {
        bounds: Bounds,
        kind: PipelineKind,
        active: bool,
    },
    Label {
        anchor: Point,
        text: String,
        role: LabelRole,
        kind: PipelineKind,
        revealed: bool,
    },
    Edge {
        from: Point,
        to: Point,
        kind: PipelineKind,
        drawn: bool,
    },
}

impl SvgPrimitive {
    /// Returns the primitive in its freshly-created state.
    fn reset(&self) -> Self {
        let mut fresh = self.clone();
        match &mut fresh {
            Self::Shape { active, .. } => *active = false,
            Self::Label { revealed, role, .. } => *revealed = *role == LabelRole::Primary,
            Self::Edge { drawn, .. } => *drawn = false,
        }
        fresh
    }

    fn apply(&mut self, transition: Transition) -> Result<(), Transition> {
        let flag = match (self, transition) {
            (Self::Shape { active, .. }, Transition::Activate) => active,
            (
                Self::Label {
                    revealed,
                    role: LabelRole::Data,
                    ..
                },
                Transition::Reveal,
            ) => revealed,
            (Self::Edge { drawn, .. }, Transition::Draw) => drawn,
            _ => return Err(transition),
        };

        if *flag {
            // Already applied; the caller maps this to a surface error
            return Err(transition);
        }
        *flag = true;
        Ok(())
    }

    fn is_applied(&self, transition: Transition) -> bool {
        match (self, transition) {
            (Self::Shape { active, .. }, Transition::Activate) => *active,
            (
                Self::Label {
                    revealed,
                    role: LabelRole::Data,
                    ..
                },
                Transition::Reveal,
            ) => *revealed,
            (Self::Edge { drawn, .. }, Transition::Draw) => *drawn,
            _ => false,
        }
    }

    /// Whether the primitive has left its initial state.
    pub fn is_lit(&self) -> bool {
        match self {
            Self::Shape { active, .. } => *active,
            Self::Label { revealed, role, .. } => *role == LabelRole::Data && *revealed,
            Self::Edge { drawn, .. } => *drawn,
        }
    }
}

/// One transition recorded by an [`SvgSurface`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JournalEntry {
    at: Duration,
    element: ElementId,
    transition: Transition,
}

impl JournalEntry {
    /// Time since the surface was last cleared.
    pub fn at(&self) -> Duration {
        self.at
    }

    pub fn element(&self) -> ElementId {
        self.element
    }

    pub fn transition(&self) -> Transition {
        self.transition
    }
}

/// SVG implementation of [`Surface`].
#[derive(Debug)]
pub struct SvgSurface {
    palette: Palette,
    node_text: Rc<TextDefinition>,
    data_text: Rc<TextDefinition>,
    epoch: u32,
    origin: Instant,
    elements: Vec<SvgPrimitive>,
    journal: Vec<JournalEntry>,
}

impl SvgSurface {
    pub fn new(palette: Palette) -> Self {
        let mut node_text = TextDefinition::new();
        node_text.set_anchor(TextAnchor::Middle);

        let mut data_text = TextDefinition::new();
        data_text.set_font_family("monospace");
        data_text.set_font_size(12);

        Self {
            palette,
            node_text: Rc::new(node_text),
            data_text: Rc::new(data_text),
            epoch: 0,
            origin: Instant::now(),
            elements: Vec::new(),
            journal: Vec::new(),
        }
    }

    /// Current clear epoch; increments on every [`Surface::clear`].
    pub fn epoch(&self) -> u32 {
        self.epoch
    }

    /// Attached primitives in append order.
    pub fn elements(&self) -> &[SvgPrimitive] {
        &self.elements
    }

    /// Looks up a live element.
    pub fn element(&self, id: ElementId) -> Option<&SvgPrimitive> {
        if id.epoch() != self.epoch {
            return None;
        }
        self.elements.get(id.index())
    }

    /// Transitions applied since the last clear, in order.
    pub fn journal(&self) -> &[JournalEntry] {
        &self.journal
    }

    /// Whether `transition` has been applied to the live element `id`.
    pub fn is_applied(&self, id: ElementId, transition: Transition) -> bool {
        self.element(id)
            .is_some_and(|element| element.is_applied(transition))
    }

    /// Renders the current state.
    pub fn render(&self) -> Document {
        self.render_elements(&self.elements)
    }

    /// Renders the state after the first `transitions` journal entries.
    ///
    /// `render_frame(0)` is the freshly built diagram; values past the end of
    /// the journal render the current state.
    pub fn render_frame(&self, transitions: usize) -> Document {
        let mut elements: Vec<SvgPrimitive> =
            self.elements.iter().map(SvgPrimitive::reset).collect();

        for entry in self.journal.iter().take(transitions) {
            if let Some(element) = elements.get_mut(entry.element.index()) {
                // Journal entries were valid when recorded
                let _ = element.apply(entry.transition);
            }
        }

        self.render_elements(&elements)
    }

    fn render_elements(&self, elements: &[SvgPrimitive]) -> Document {
        let bounds = elements
            .iter()
            .map(|element| self.element_bounds(element))
            .reduce(|acc, bounds| acc.merge(&bounds))
            .unwrap_or_else(|| Bounds::new_from_top_left(Point::default(), Size::new(300.0, 100.0)))
            .inflate(DOCUMENT_MARGIN);

        let mut output = LayeredOutput::new();

        if let Some(background) = self.palette.background() {
            let bg = svg_element::Rectangle::new()
                .set("x", bounds.min_x())
                .set("y", bounds.min_y())
                .set("width", bounds.width())
                .set("height", bounds.height())
                .set("fill", background);
            output.add_to_layer(RenderLayer::Background, Box::new(bg));
        }

        for element in elements {
            output.merge(self.render_element(element));
        }

        let mut doc = Document::new()
            .set(
                "viewBox",
                (bounds.min_x(), bounds.min_y(), bounds.width(), bounds.height()),
            )
            .set("width", bounds.width())
            .set("height", bounds.height())
            .add(svg_element::Style::new(STYLESHEET));

        for node in output.render() {
            doc = doc.add(node);
        }

        doc
    }

    fn render_element(&self, element: &SvgPrimitive) -> LayeredOutput {
        match element {
            SvgPrimitive::Shape {
                bounds,
                kind,
                active,
            } => {
                let accent = self.palette.accent(*kind);
                let (class, fill) = if *active {
                    ("node active", Some(accent.with_alpha(ACTIVE_FILL_ALPHA)))
                } else {
                    ("node", None)
                };

                let rect = Rectangle::new(bounds.to_size())
                    .with_rounded(NODE_CORNER_RADIUS)
                    .with_fill(fill)
                    .with_stroke(StrokeDefinition::new(accent, 2.0))
                    .with_class(class);

                rect.render_to_layers(bounds.center())
            }
            SvgPrimitive::Label {
                anchor,
                text,
                role,
                kind,
                revealed,
            } => {
                let label = match role {
                    LabelRole::Primary => {
                        Text::new(Rc::clone(&self.node_text), text.as_str()).with_class("node-text")
                    }
                    LabelRole::Data => {
                        let class = if *revealed {
                            "data-label fade-in"
                        } else {
                            "data-label hidden"
                        };
                        let mut definition = (*self.data_text).clone();
                        definition.set_color(Some(self.palette.accent(*kind)));
                        Text::new(Rc::new(definition), text.as_str()).with_class(class)
                    }
                };
                label.render_to_layers(*anchor)
            }
            SvgPrimitive::Edge {
                from,
                to,
                kind,
                drawn,
            } => {
                let class = if *drawn { "edge animate" } else { "edge" };
                Connector::new(*from, *to)
                    .with_stroke(
                        StrokeDefinition::new(self.palette.accent(*kind), 2.0)
                            .with_cap(LineCap::Round),
                    )
                    .with_class(class)
                    .with_dash_draw()
                    .render_to_layers(Point::default())
            }
        }
    }

    fn element_bounds(&self, element: &SvgPrimitive) -> Bounds {
        match element {
            SvgPrimitive::Shape { bounds, .. } => *bounds,
            SvgPrimitive::Label {
                anchor, text, role, ..
            } => {
                let definition = match role {
                    LabelRole::Primary => &self.node_text,
                    LabelRole::Data => &self.data_text,
                };
                let size = Text::new(Rc::clone(definition), text.as_str()).size();
                let left = match definition.anchor() {
                    TextAnchor::Start => anchor.x(),
                    TextAnchor::Middle => anchor.x() - size.width() / 2.0,
                };
                Bounds::new_from_top_left(Point::new(left, anchor.y() - size.height()), size)
            }
            SvgPrimitive::Edge { from, to, .. } => {
                Bounds::new_from_top_left(*from, Size::default())
                    .merge(&Bounds::new_from_top_left(*to, Size::default()))
            }
        }
    }
}

impl Default for SvgSurface {
    fn default() -> Self {
        Self::new(Palette::default())
    }
}

impl Surface for SvgSurface {
    type Primitive = SvgPrimitive;

    fn create_shape(&self, bounds: Bounds, kind: PipelineKind) -> SvgPrimitive {
        SvgPrimitive::Shape {
            bounds,
            kind,
            active: false,
        }
    }

    fn create_label(
        &self,
        anchor: Point,
        text: &str,
        role: LabelRole,
        kind: PipelineKind,
    ) -> SvgPrimitive {
        SvgPrimitive::Label {
            anchor,
            text: text.to_string(),
            role,
            kind,
            revealed: role == LabelRole::Primary,
        }
    }

    fn create_edge(&self, from: Point, to: Point, kind: PipelineKind) -> SvgPrimitive {
        SvgPrimitive::Edge {
            from,
            to,
            kind,
            drawn: false,
        }
    }

    fn append(&mut self, primitive: SvgPrimitive) -> ElementId {
        let index = u32::try_from(self.elements.len()).unwrap_or(u32::MAX);
        self.elements.push(primitive);
        ElementId::new(self.epoch, index)
    }

    fn apply(&mut self, id: ElementId, transition: Transition) -> Result<(), SurfaceError> {
        if id.epoch() != self.epoch {
            return Err(SurfaceError::StaleElement(id));
        }

        let element = self
            .elements
            .get_mut(id.index())
            .ok_or(SurfaceError::UnknownElement(id))?;

        if element.is_applied(transition) {
            return Err(SurfaceError::AlreadyApplied { id, transition });
        }
        element
            .apply(transition)
            .map_err(|transition| SurfaceError::UnsupportedTransition { id, transition })?;

        let at = Instant::now().saturating_duration_since(self.origin);
        trace!(element:% = id, transition:% = transition, at:? = at; "Transition applied");
        self.journal.push(JournalEntry {
            at,
            element: id,
            transition,
        });
        Ok(())
    }

    fn clear(&mut self) {
        debug!(
            epoch = self.epoch,
            elements = self.elements.len();
            "Clearing surface"
        );
        self.elements.clear();
        self.journal.clear();
        self.epoch = self.epoch.wrapping_add(1);
        self.origin = Instant::now();
    }

    fn len(&self) -> usize {
        self.elements.len()
    }
}
