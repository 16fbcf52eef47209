//! Turns a [`PipelineLayout`] into visual primitives on a [`Surface`].
//!
//! Building only appends inactive primitives; nothing is animated here.

use log::debug;

use cipherflow_core::geometry::Point;

use crate::{
    config::LayoutConfig,
    layout::PipelineLayout,
    model::PipelineKind,
    surface::{ElementId, LabelRole, Surface},
};

/// Baseline of both labels, as a fraction of the node height below its top.
const LABEL_BASELINE_RATIO: f32 = 0.6;

/// Surface handles of one node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeVisual {
    shape: ElementId,
    label: ElementId,
    data_label: ElementId,
}

impl NodeVisual {
    pub fn shape(&self) -> ElementId {
        self.shape
    }

    /// The always-visible step label.
    pub fn label(&self) -> ElementId {
        self.label
    }

    /// The step data, hidden until the sequencer reveals it.
    pub fn data_label(&self) -> ElementId {
        self.data_label
    }
}

/// Surface handle of one edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeVisual {
    line: ElementId,
}

impl EdgeVisual {
    pub fn line(&self) -> ElementId {
        self.line
    }
}

/// Everything the sequencer needs to animate one pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagram {
    kind: PipelineKind,
    nodes: Vec<NodeVisual>,
    edges: Vec<EdgeVisual>,
}

impl Diagram {
    pub fn kind(&self) -> PipelineKind {
        self.kind
    }

    pub fn nodes(&self) -> &[NodeVisual] {
        &self.nodes
    }

    pub fn edges(&self) -> &[EdgeVisual] {
        &self.edges
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

#[derive(Debug, Clone, Default)]
pub struct DiagramBuilder {
    config: LayoutConfig,
}

impl DiagramBuilder {
    pub fn new(config: LayoutConfig) -> Self {
        Self { config }
    }

    /// Appends the primitives for `layout` to `surface`.
    ///
    /// Node *i* is appended as shape, label and data label; when `i > 0` the
    /// edge from node *i - 1* follows immediately.
    pub fn build<S: Surface>(
        &self,
        layout: &PipelineLayout,
        kind: PipelineKind,
        surface: &mut S,
    ) -> Diagram {
        let baseline = self.config.node_height() * LABEL_BASELINE_RATIO;
        let data_offset = self.config.node_width() / 2.0 + self.config.label_offset();

        let mut nodes = Vec::with_capacity(layout.nodes().len());
        let mut edges = Vec::with_capacity(layout.edges().len());

        for (i, node) in layout.nodes().iter().enumerate() {
            let shape = surface.create_shape(node.bounds(), kind);
            let shape = surface.append(shape);

            let label = surface.create_label(
                Point::new(node.x(), node.y() + baseline),
                node.step().label(),
                LabelRole::Primary,
                kind,
            );
            let label = surface.append(label);

            let data_label = surface.create_label(
                Point::new(node.x() + data_offset, node.y() + baseline),
                node.step().data(),
                LabelRole::Data,
                kind,
            );
            let data_label = surface.append(data_label);

            nodes.push(NodeVisual {
                shape,
                label,
                data_label,
            });

            if let Some(edge) = i.checked_sub(1).and_then(|prev| layout.edges().get(prev)) {
                let line = surface.create_edge(edge.from(), edge.to(), kind);
                edges.push(EdgeVisual {
                    line: surface.append(line),
                });
            }
        }

        debug!(
            kind:% = kind,
            nodes = nodes.len(),
            edges = edges.len();
            "Diagram built"
        );

        Diagram { kind, nodes, edges }
    }
}
