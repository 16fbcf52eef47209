//! Error types for Cipherflow operations.
//!
//! This module provides the main error type [`CipherflowError`] which wraps
//! the error conditions that can occur while fetching, rendering and
//! exporting pipeline diagrams.

use std::io;

use thiserror::Error;

use crate::source::FetchError;

/// The main error type for Cipherflow operations.
#[derive(Debug, Error)]
pub enum CipherflowError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Animation task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl CipherflowError {
    /// Returns `true` for errors that must be shown to the user before any
    /// presentation is opened.
    pub fn is_fetch(&self) -> bool {
        matches!(self, Self::Fetch(_))
    }
}
