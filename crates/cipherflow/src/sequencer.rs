//! Timed, strictly ordered reveal of one pipeline diagram.
//!
//! For node *i* the sequencer activates the shape, reveals the data label and
//! waits for the node delay; if an outgoing edge exists it is drawn and the
//! edge delay follows. Runs are guarded by a [`RunToken`]: once a newer run
//! has been issued, the old one stops before its next mutation.

use std::{
    cell::{Cell, RefCell},
    rc::Rc,
    time::Duration,
};

use log::{debug, info, warn};
use tokio::time::sleep;

use crate::{
    config::AnimationConfig,
    diagram::Diagram,
    surface::{ElementId, Surface, Transition},
};

/// Monotonic run counter shared by an orchestrator and its runs.
#[derive(Debug, Clone, Default)]
pub struct Generation(Rc<Cell<u64>>);

impl Generation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new generation, invalidating every token issued before.
    pub fn advance(&self) -> RunToken {
        let issued = self.0.get().wrapping_add(1);
        self.0.set(issued);
        RunToken {
            issued,
            current: Rc::clone(&self.0),
        }
    }
}

/// Ticket of one run; stale once its [`Generation`] advances.
#[derive(Debug, Clone)]
pub struct RunToken {
    issued: u64,
    current: Rc<Cell<u64>>,
}

impl RunToken {
    pub fn generation(&self) -> u64 {
        self.issued
    }

    pub fn is_current(&self) -> bool {
        self.current.get() == self.issued
    }
}

/// How a sequencer run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// Every node was shown.
    Completed { steps: usize },
    /// A newer run was issued; stopped before touching node `step`.
    Superseded { step: usize },
    /// The surface rejected a mutation while showing node `step`.
    Abandoned { step: usize },
}

impl RunOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed { .. })
    }
}

/// Drives the reveal animation with fixed delays.
#[derive(Debug, Clone, Default)]
pub struct Sequencer {
    node_delay: Duration,
    edge_delay: Duration,
}

impl Sequencer {
    pub fn new(config: &AnimationConfig) -> Self {
        Self {
            node_delay: config.node_delay(),
            edge_delay: config.edge_delay(),
        }
    }

    /// Total duration of an uninterrupted run over `steps` nodes.
    pub fn run_duration(&self, steps: usize) -> Duration {
        let steps = u32::try_from(steps).unwrap_or(u32::MAX);
        self.node_delay * steps + self.edge_delay * steps.saturating_sub(1)
    }

    /// Animates `diagram` on `surface`.
    ///
    /// The token is checked before every mutation, including the first, so a
    /// run superseded before it was ever polled leaves the surface untouched.
    /// No surface borrow is held across a suspension point.
    pub async fn run<S: Surface>(
        &self,
        surface: &RefCell<S>,
        diagram: &Diagram,
        token: &RunToken,
    ) -> RunOutcome {
        let steps = diagram.nodes().len();
        info!(
            kind:% = diagram.kind(),
            steps = steps,
            generation = token.generation();
            "Starting sequencer run"
        );

        for (i, node) in diagram.nodes().iter().enumerate() {
            if !token.is_current() {
                return superseded(diagram, token, i);
            }

            let shown = apply(surface, node.shape(), Transition::Activate)
                .and_then(|()| apply(surface, node.data_label(), Transition::Reveal));
            if let Err(id) = shown {
                return abandoned(diagram, id, i);
            }

            sleep(self.node_delay).await;

            let Some(edge) = diagram.edges().get(i) else {
                continue;
            };

            if !token.is_current() {
                return superseded(diagram, token, i + 1);
            }
            if let Err(id) = apply(surface, edge.line(), Transition::Draw) {
                return abandoned(diagram, id, i);
            }

            sleep(self.edge_delay).await;
        }

        info!(kind:% = diagram.kind(), steps = steps; "Sequencer run completed");
        RunOutcome::Completed { steps }
    }
}

fn apply<S: Surface>(
    surface: &RefCell<S>,
    id: ElementId,
    transition: Transition,
) -> Result<(), ElementId> {
    let result = surface.borrow_mut().apply(id, transition);
    result.map_err(|err| {
        warn!(error:err = err; "Surface rejected transition");
        id
    })
}

fn superseded(diagram: &Diagram, token: &RunToken, step: usize) -> RunOutcome {
    debug!(
        kind:% = diagram.kind(),
        generation = token.generation(),
        step = step;
        "Sequencer run superseded"
    );
    RunOutcome::Superseded { step }
}

fn abandoned(diagram: &Diagram, id: ElementId, step: usize) -> RunOutcome {
    debug!(
        kind:% = diagram.kind(),
        element:% = id,
        step = step;
        "Sequencer run abandoned"
    );
    RunOutcome::Abandoned { step }
}
