//! CLI logic for the Cipherflow pipeline renderer.
//!
//! Loads a recorded simulation result, animates both pipelines on a
//! single-threaded Tokio runtime and exports the final diagrams as SVG.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::{cell::RefCell, rc::Rc, time::Duration};

use log::info;
use tokio::{runtime, task::LocalSet};

use cipherflow::{
    CipherflowError, Credentials, JsonFileSource, Orchestrator, PipelineKind, SvgExporter,
    SvgSurface,
    config::{AnimationConfig, AppConfig},
};

/// Run the Cipherflow CLI application
///
/// Submits the input file with the given credentials, waits for both
/// animations to finish, prints the metrics table and writes
/// `classical.svg` and `pqc.svg` (plus frames when requested) to the output
/// directory.
///
/// # Errors
///
/// Returns `CipherflowError` for:
/// - Configuration loading errors
/// - Missing credentials, unreadable or malformed simulation results
/// - File I/O errors while exporting
pub fn run(args: &Args) -> Result<(), CipherflowError> {
    info!(
        input_path = args.input,
        output_dir = args.output;
        "Processing simulation result"
    );

    let mut app_config = config::load_config(args.config.as_ref())?;
    if args.instant {
        app_config = app_config.with_animation(AnimationConfig::new(Duration::ZERO, Duration::ZERO));
    }

    let runtime = runtime::Builder::new_current_thread().enable_time().build()?;
    LocalSet::new().block_on(&runtime, animate(args, &app_config))
}

async fn animate(args: &Args, config: &AppConfig) -> Result<(), CipherflowError> {
    let palette = config.style().palette().map_err(CipherflowError::Config)?;
    let mut orchestrator = Orchestrator::new(
        config,
        Rc::new(RefCell::new(SvgSurface::new(palette))),
        Rc::new(RefCell::new(SvgSurface::new(palette))),
    );

    let source = JsonFileSource::new(&args.input);
    let credentials = Credentials::new(args.username.as_str(), args.password.as_str());
    let handles = orchestrator.submit(&source, &credentials).await?;

    if let Some(table) = orchestrator.presentation().table() {
        println!("{table}");
    }

    let (classical, pqc) = handles.join().await?;
    info!(classical:?, pqc:?; "Animations finished");

    let exporter = SvgExporter::new(&args.output);
    for kind in PipelineKind::ALL {
        let surface = orchestrator.surface(kind).borrow();
        exporter.export(kind, &surface)?;
        if args.frames {
            exporter.export_frames(kind, &surface)?;
        }
    }

    info!(output_dir = args.output; "SVG exported successfully");

    Ok(())
}
