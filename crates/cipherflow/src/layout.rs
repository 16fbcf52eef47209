//! Vertical single-column layout for pipeline steps.
//!
//! Node *i* sits on a fixed track: horizontally centered on
//! [`LayoutConfig::center_x`], top edge at `y_base + i * vertical_spacing`.
//! Edge *i* runs from the bottom-center of node *i* to the top-center of node
//! *i + 1*. Layout is a pure function of the step list and the configuration.

use log::trace;

use cipherflow_core::geometry::{Bounds, Point, Size};

use crate::{config::LayoutConfig, model::Step};

/// A positioned step.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    step: Step,
    bounds: Bounds,
}

impl Node {
    pub fn step(&self) -> &Step {
        &self.step
    }

    /// Horizontal center of the node.
    pub fn x(&self) -> f32 {
        self.bounds.center().x()
    }

    /// Top edge of the node.
    pub fn y(&self) -> f32 {
        self.bounds.min_y()
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }
}

/// A straight segment between two consecutive nodes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    from: Point,
    to: Point,
}

impl Edge {
    pub fn from(&self) -> Point {
        self.from
    }

    pub fn to(&self) -> Point {
        self.to
    }

    pub fn x1(&self) -> f32 {
        self.from.x()
    }

    pub fn y1(&self) -> f32 {
        self.from.y()
    }

    pub fn x2(&self) -> f32 {
        self.to.x()
    }

    pub fn y2(&self) -> f32 {
        self.to.y()
    }
}

/// Output of [`LayoutEngine::layout`]: `N` nodes and `max(N - 1, 0)` edges.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PipelineLayout {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
}

impl PipelineLayout {
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Bounding box of all node boxes, or `None` for an empty layout.
    pub fn bounds(&self) -> Option<Bounds> {
        let (first, rest) = self.nodes.split_first()?;
        Some(
            rest.iter()
                .fold(first.bounds(), |acc, node| acc.merge(&node.bounds())),
        )
    }
}

/// Computes node positions and edge segments for one pipeline.
#[derive(Debug, Clone, Default)]
pub struct LayoutEngine {
    config: LayoutConfig,
}

impl LayoutEngine {
    pub fn new(config: LayoutConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Fixed footprint shared by every node.
    pub fn node_size(&self) -> Size {
        Size::new(self.config.node_width(), self.config.node_height())
    }

    /// Lays out `steps` top to bottom. An empty slice yields an empty layout.
    pub fn layout(&self, steps: &[Step]) -> PipelineLayout {
        let node_size = self.node_size();

        let nodes: Vec<Node> = steps
            .iter()
            .enumerate()
            .map(|(i, step)| {
                let top = self.config.y_base() + i as f32 * self.config.vertical_spacing();
                let left = self.config.center_x() - node_size.width() / 2.0;
                Node {
                    step: step.clone(),
                    bounds: Bounds::new_from_top_left(Point::new(left, top), node_size),
                }
            })
            .collect();

        let edges: Vec<Edge> = nodes
            .windows(2)
            .map(|pair| Edge {
                from: pair[0].bounds().bottom_center(),
                to: pair[1].bounds().top_center(),
            })
            .collect();

        trace!(nodes = nodes.len(), edges = edges.len(); "Pipeline laid out");

        PipelineLayout { nodes, edges }
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    fn steps(n: usize) -> Vec<Step> {
        (0..n)
            .map(|i| Step::new(format!("Step {i}"), format!("data {i}")))
            .collect()
    }

    #[test]
    fn test_empty_pipeline_has_no_nodes_or_edges() {
        let layout = LayoutEngine::default().layout(&[]);

        assert!(layout.is_empty());
        assert!(layout.edges().is_empty());
        assert!(layout.bounds().is_none());
    }

    #[test]
    fn test_single_step_has_no_edges() {
        let layout = LayoutEngine::default().layout(&steps(1));

        assert_eq!(layout.nodes().len(), 1);
        assert!(layout.edges().is_empty());
    }

    #[test]
    fn test_two_step_positions() {
        let input = vec![
            Step::new("RSA-2048 KeyGen", "2048-bit"),
            Step::new("Encrypt", "256B ciphertext"),
        ];
        let layout = LayoutEngine::default().layout(&input);

        assert_eq!(layout.nodes().len(), 2);
        assert_eq!(layout.edges().len(), 1);

        let first = &layout.nodes()[0];
        let second = &layout.nodes()[1];
        assert_eq!(first.step().label(), "RSA-2048 KeyGen");
        assert_approx_eq!(f32, first.x(), 150.0);
        assert_approx_eq!(f32, first.y(), 50.0);
        assert_approx_eq!(f32, second.y(), 130.0);
        assert_approx_eq!(f32, first.bounds().min_x(), 40.0);
        assert_approx_eq!(f32, first.bounds().width(), 220.0);

        let edge = layout.edges()[0];
        assert_approx_eq!(f32, edge.x1(), 150.0);
        assert_approx_eq!(f32, edge.y1(), 100.0);
        assert_approx_eq!(f32, edge.x2(), 150.0);
        assert_approx_eq!(f32, edge.y2(), 130.0);
    }

    #[test]
    fn test_custom_spacing() {
        let engine = LayoutEngine::new(LayoutConfig::new(100.0, 20.0, 40.0));
        let layout = engine.layout(&steps(3));

        assert_approx_eq!(f32, layout.nodes()[2].y(), 50.0 + 2.0 * 40.0);
        assert_approx_eq!(f32, layout.edges()[1].y1(), 50.0 + 40.0 + 20.0);
    }

    #[test]
    fn test_bounds_span_all_nodes() {
        let layout = LayoutEngine::default().layout(&steps(3));
        let bounds = layout.bounds().unwrap();

        assert_approx_eq!(f32, bounds.min_y(), 50.0);
        assert_approx_eq!(f32, bounds.max_y(), 50.0 + 2.0 * 80.0 + 50.0);
    }
}
