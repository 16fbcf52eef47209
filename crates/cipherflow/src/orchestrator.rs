//! Command handlers tying fetching, layout, building and sequencing together.
//!
//! The [`Orchestrator`] owns the two pipeline surfaces, the last successful
//! [`SimulationResult`] and the presentation state shown around the diagrams.
//! Every run clears both surfaces, rebuilds them from scratch and spawns one
//! sequencer task per pipeline on the current [`tokio::task::LocalSet`].

use std::{cell::RefCell, rc::Rc};

use log::{debug, error, info};
use tokio::task::{JoinError, JoinHandle, spawn_local};

use crate::{
    config::AppConfig,
    diagram::DiagramBuilder,
    layout::LayoutEngine,
    metrics::MetricsTable,
    model::{PipelineKind, SimulationResult},
    sequencer::{Generation, RunOutcome, Sequencer},
    source::{Credentials, FetchError, SimulationSource},
    surface::Surface,
};

/// What the user sees around the two diagrams.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Presentation {
    overlay_visible: bool,
    notice: Option<String>,
    table: Option<MetricsTable>,
}

impl Presentation {
    /// Whether the comparison overlay is open.
    pub fn overlay_visible(&self) -> bool {
        self.overlay_visible
    }

    /// Failure notice from the last submit, if it failed.
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// Metrics of the result currently shown.
    pub fn table(&self) -> Option<&MetricsTable> {
        self.table.as_ref()
    }
}

/// Join handles of the two sequencer tasks of one run.
#[derive(Debug)]
pub struct RunHandles {
    classical: JoinHandle<RunOutcome>,
    pqc: JoinHandle<RunOutcome>,
}

impl RunHandles {
    /// Waits for both runs.
    ///
    /// # Errors
    ///
    /// Returns the [`JoinError`] of a sequencer task that panicked.
    pub async fn join(self) -> Result<(RunOutcome, RunOutcome), JoinError> {
        let (classical, pqc) = tokio::join!(self.classical, self.pqc);
        Ok((classical?, pqc?))
    }
}

/// Coordinates both pipelines.
pub struct Orchestrator<S: Surface + 'static> {
    layout: LayoutEngine,
    builder: DiagramBuilder,
    sequencer: Rc<Sequencer>,
    classical: Rc<RefCell<S>>,
    pqc: Rc<RefCell<S>>,
    generation: Generation,
    last_result: Option<Rc<SimulationResult>>,
    presentation: Presentation,
}

impl<S: Surface + 'static> Orchestrator<S> {
    pub fn new(config: &AppConfig, classical: Rc<RefCell<S>>, pqc: Rc<RefCell<S>>) -> Self {
        Self {
            layout: LayoutEngine::new(config.layout().clone()),
            builder: DiagramBuilder::new(config.layout().clone()),
            sequencer: Rc::new(Sequencer::new(config.animation())),
            classical,
            pqc,
            generation: Generation::new(),
            last_result: None,
            presentation: Presentation::default(),
        }
    }

    pub fn surface(&self, kind: PipelineKind) -> &Rc<RefCell<S>> {
        match kind {
            PipelineKind::Classical => &self.classical,
            PipelineKind::Pqc => &self.pqc,
        }
    }

    pub fn presentation(&self) -> &Presentation {
        &self.presentation
    }

    /// The result that [`Self::replay`] would show.
    pub fn last_result(&self) -> Option<&SimulationResult> {
        self.last_result.as_deref()
    }

    pub fn sequencer(&self) -> &Sequencer {
        &self.sequencer
    }

    /// Shows `result` and starts both animations.
    ///
    /// Any run still in flight is superseded.
    ///
    /// # Panics
    ///
    /// Must be called from within a [`tokio::task::LocalSet`].
    pub fn on_result(&mut self, result: SimulationResult) -> RunHandles {
        let result = Rc::new(result);
        self.last_result = Some(Rc::clone(&result));
        self.start(&result)
    }

    /// Re-runs the animation of the last result without fetching.
    ///
    /// Returns `None` and does nothing when no result was ever shown.
    ///
    /// # Panics
    ///
    /// Must be called from within a [`tokio::task::LocalSet`].
    pub fn replay(&mut self) -> Option<RunHandles> {
        let Some(result) = self.last_result.clone() else {
            info!("Replay requested before any result; ignoring");
            return None;
        };
        Some(self.start(&result))
    }

    /// Fetches a result from `source` and shows it.
    ///
    /// On failure the notice is set, the overlay stays closed and neither
    /// surface is touched.
    ///
    /// # Errors
    ///
    /// Returns the [`FetchError`] reported by `source`.
    ///
    /// # Panics
    ///
    /// Must be called from within a [`tokio::task::LocalSet`].
    pub async fn submit<Src: SimulationSource>(
        &mut self,
        source: &Src,
        credentials: &Credentials,
    ) -> Result<RunHandles, FetchError> {
        match source.simulate(credentials).await {
            Ok(result) => {
                self.presentation.notice = None;
                self.presentation.overlay_visible = true;
                Ok(self.on_result(result))
            }
            Err(err) => {
                error!(err:err = err; "Simulation failed to initialize");
                self.presentation.notice = Some(err.to_string());
                Err(err)
            }
        }
    }

    /// Hides the overlay. Running animations continue.
    pub fn close(&mut self) {
        self.presentation.overlay_visible = false;
    }

    fn start(&mut self, result: &SimulationResult) -> RunHandles {
        let token = self.generation.advance();
        info!(generation = token.generation(); "Starting pipeline runs");

        self.presentation.table = Some(MetricsTable::from_comparison(result.comparison()));

        let spawn = |kind: PipelineKind| {
            let pipeline = result.pipeline(kind);
            if pipeline.is_empty() {
                debug!(kind:% = kind; "Pipeline has no steps, nothing to animate");
            } else {
                info!(
                    kind:% = kind,
                    steps = pipeline.len(),
                    duration:? = self.sequencer.run_duration(pipeline.len());
                    "Scheduling pipeline run"
                );
            }
            let layout = self.layout.layout(pipeline.steps());

            let surface = Rc::clone(self.surface(kind));
            let diagram = {
                let mut surface = surface.borrow_mut();
                surface.clear();
                self.builder.build(&layout, kind, &mut *surface)
            };

            let sequencer = Rc::clone(&self.sequencer);
            let token = token.clone();
            spawn_local(async move { sequencer.run(&*surface, &diagram, &token).await })
        };

        let classical = spawn(PipelineKind::Classical);
        let pqc = spawn(PipelineKind::Pqc);
        RunHandles { classical, pqc }
    }
}
