//! Writes rendered pipeline surfaces to disk.

use std::{
    fs,
    path::{Path, PathBuf},
};

use log::{debug, info};

use crate::{error::CipherflowError, model::PipelineKind, surface::SvgSurface};

/// Exports [`SvgSurface`] state as SVG files into one directory.
///
/// The final state of a pipeline goes to `<kind>.svg`. Frames are written as
/// `<kind>-frame-NNN.svg`, frame 0 being the freshly built diagram and frame
/// *k* the state after *k* transitions.
#[derive(Debug, Clone)]
pub struct SvgExporter {
    dir: PathBuf,
}

impl SvgExporter {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Writes the current state of `surface`.
    ///
    /// # Errors
    ///
    /// Returns [`CipherflowError::Io`] if the directory or file cannot be written.
    pub fn export(
        &self,
        kind: PipelineKind,
        surface: &SvgSurface,
    ) -> Result<PathBuf, CipherflowError> {
        fs::create_dir_all(&self.dir)?;

        let path = self.dir.join(format!("{}.svg", kind.name()));
        svg::save(&path, &surface.render())?;

        info!(path = path.display().to_string(); "SVG exported");
        Ok(path)
    }

    /// Writes one file per journal prefix of `surface`.
    ///
    /// # Errors
    ///
    /// Returns [`CipherflowError::Io`] if the directory or a file cannot be written.
    pub fn export_frames(
        &self,
        kind: PipelineKind,
        surface: &SvgSurface,
    ) -> Result<Vec<PathBuf>, CipherflowError> {
        fs::create_dir_all(&self.dir)?;

        let frames = (0..=surface.journal().len())
            .map(|frame| -> Result<PathBuf, CipherflowError> {
                let path = self
                    .dir
                    .join(format!("{}-frame-{frame:03}.svg", kind.name()));
                svg::save(&path, &surface.render_frame(frame))?;
                debug!(path = path.display().to_string(), frame = frame; "Frame exported");
                Ok(path)
            })
            .collect::<Result<Vec<_>, _>>()?;

        info!(kind:% = kind, frames = frames.len(); "Frames exported");
        Ok(frames)
    }
}
