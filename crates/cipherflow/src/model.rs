//! Data model for simulation results.
//!
//! These types mirror the payload produced by the upstream simulation
//! service. They are immutable once received: a new run replaces them
//! wholesale.

use std::fmt;

use serde::Deserialize;

/// One stage of a pipeline: an operation name and the artifact it produced.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Step {
    /// Upstream step tag such as `"c3"`, when provided.
    #[serde(default)]
    id: Option<String>,
    label: String,
    data: String,
}

impl Step {
    pub fn new(label: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            id: None,
            label: label.into(),
            data: data.into(),
        }
    }

    /// Attaches an upstream step tag (builder style).
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Name of the operation performed at this step.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Human-readable payload, e.g. a size or a hex snippet.
    pub fn data(&self) -> &str {
        &self.data
    }
}

/// Which side of the comparison a pipeline belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PipelineKind {
    Classical,
    Pqc,
}

impl PipelineKind {
    /// Both kinds in presentation order.
    pub const ALL: [PipelineKind; 2] = [PipelineKind::Classical, PipelineKind::Pqc];

    pub fn name(self) -> &'static str {
        match self {
            Self::Classical => "classical",
            Self::Pqc => "pqc",
        }
    }
}

impl fmt::Display for PipelineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An ordered, possibly empty, sequence of steps tagged with its kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pipeline<'a> {
    kind: PipelineKind,
    steps: &'a [Step],
}

impl<'a> Pipeline<'a> {
    pub fn new(kind: PipelineKind, steps: &'a [Step]) -> Self {
        Self { kind, steps }
    }

    pub fn kind(&self) -> PipelineKind {
        self.kind
    }

    pub fn steps(&self) -> &'a [Step] {
        self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

/// Scalar metrics describing one side of the comparison.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ComparisonMetrics {
    algo: String,
    pk_size: String,
    ct_size: String,
    quantum_safe: String,
}

impl ComparisonMetrics {
    pub fn new(
        algo: impl Into<String>,
        pk_size: impl Into<String>,
        ct_size: impl Into<String>,
        quantum_safe: impl Into<String>,
    ) -> Self {
        Self {
            algo: algo.into(),
            pk_size: pk_size.into(),
            ct_size: ct_size.into(),
            quantum_safe: quantum_safe.into(),
        }
    }

    pub fn algo(&self) -> &str {
        &self.algo
    }

    pub fn pk_size(&self) -> &str {
        &self.pk_size
    }

    pub fn ct_size(&self) -> &str {
        &self.ct_size
    }

    pub fn quantum_safe(&self) -> &str {
        &self.quantum_safe
    }
}

/// Metrics for both sides.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Comparison {
    classical: ComparisonMetrics,
    pqc: ComparisonMetrics,
}

impl Comparison {
    pub fn new(classical: ComparisonMetrics, pqc: ComparisonMetrics) -> Self {
        Self { classical, pqc }
    }

    pub fn classical(&self) -> &ComparisonMetrics {
        &self.classical
    }

    pub fn pqc(&self) -> &ComparisonMetrics {
        &self.pqc
    }

    pub fn metrics(&self, kind: PipelineKind) -> &ComparisonMetrics {
        match kind {
            PipelineKind::Classical => &self.classical,
            PipelineKind::Pqc => &self.pqc,
        }
    }
}

/// The full input to one animation run.
///
/// Every field is required; deserializing a payload with a missing field
/// fails instead of defaulting.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SimulationResult {
    comparison: Comparison,
    classical: Vec<Step>,
    pqc: Vec<Step>,
}

impl SimulationResult {
    pub fn new(comparison: Comparison, classical: Vec<Step>, pqc: Vec<Step>) -> Self {
        Self {
            comparison,
            classical,
            pqc,
        }
    }

    pub fn comparison(&self) -> &Comparison {
        &self.comparison
    }

    /// Borrow the steps of one side as a [`Pipeline`].
    pub fn pipeline(&self, kind: PipelineKind) -> Pipeline<'_> {
        let steps = match kind {
            PipelineKind::Classical => &self.classical,
            PipelineKind::Pqc => &self.pqc,
        };
        Pipeline::new(kind, steps)
    }
}
