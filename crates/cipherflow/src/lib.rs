//! Cipherflow - animated side-by-side comparison of classical and
//! post-quantum key-exchange pipelines.
//!
//! A simulation result carries two ordered step lists. Each list is laid out
//! as a vertical column of nodes joined by edges, built onto its own drawing
//! surface, and revealed step by step with fixed delays. The two pipelines
//! animate concurrently on a single-threaded Tokio runtime.
//!
//! # Examples
//!
//! ```rust,no_run
//! use std::{cell::RefCell, rc::Rc};
//!
//! use cipherflow::{
//!     Credentials, JsonFileSource, Orchestrator, PipelineKind, SvgSurface, config::AppConfig,
//! };
//!
//! # async fn demo() -> Result<(), cipherflow::CipherflowError> {
//! let config = AppConfig::default();
//! let palette = config.style().palette().map_err(cipherflow::CipherflowError::Config)?;
//!
//! let mut orchestrator = Orchestrator::new(
//!     &config,
//!     Rc::new(RefCell::new(SvgSurface::new(palette))),
//!     Rc::new(RefCell::new(SvgSurface::new(palette))),
//! );
//!
//! let source = JsonFileSource::new("result.json");
//! let handles = orchestrator
//!     .submit(&source, &Credentials::new("alice", "hunter2"))
//!     .await?;
//! handles.join().await?;
//!
//! let svg = orchestrator.surface(PipelineKind::Pqc).borrow().render();
//! println!("{svg}");
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod diagram;
pub mod export;
pub mod layout;
pub mod metrics;
pub mod model;
pub mod orchestrator;
pub mod sequencer;
pub mod source;
pub mod surface;

mod error;

pub use cipherflow_core::{color, draw, geometry};

pub use error::CipherflowError;
pub use export::SvgExporter;
pub use metrics::MetricsTable;
pub use model::{PipelineKind, SimulationResult, Step};
pub use orchestrator::{Orchestrator, Presentation, RunHandles};
pub use sequencer::RunOutcome;
pub use source::{Credentials, FetchError, JsonFileSource, SimulationSource};
pub use surface::{Surface, SvgSurface};
