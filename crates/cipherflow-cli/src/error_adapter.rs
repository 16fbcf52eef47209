//! Error adapter for converting CipherflowError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan};

use cipherflow::{CipherflowError, FetchError};

/// Adapter giving a [`CipherflowError`] a stable code and, where useful, a hint.
pub struct ErrorAdapter<'a>(pub &'a CipherflowError);

impl ErrorAdapter<'_> {
    fn code_str(&self) -> &'static str {
        match &self.0 {
            CipherflowError::Io(_) => "cipherflow::io",
            CipherflowError::Fetch(FetchError::Failure(_)) => "cipherflow::fetch",
            CipherflowError::Fetch(FetchError::Malformed(_)) => "cipherflow::fetch::malformed",
            CipherflowError::Fetch(FetchError::MissingCredentials) => {
                "cipherflow::fetch::credentials"
            }
            CipherflowError::Config(_) => "cipherflow::config",
            CipherflowError::Task(_) => "cipherflow::task",
        }
    }

    fn help_str(&self) -> Option<&'static str> {
        match &self.0 {
            CipherflowError::Fetch(FetchError::Malformed(_)) => Some(
                "a simulation result needs `classical`, `pqc` and a `comparison` \
                 with `algo`, `pk_size`, `ct_size` and `quantum_safe` for both pipelines",
            ),
            CipherflowError::Fetch(FetchError::MissingCredentials) => {
                Some("pass a non-empty --username and --password")
            }
            CipherflowError::Config(_) => Some("check the [layout], [animation] and [style] tables"),
            _ => None,
        }
    }
}

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(self.0)
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(self.code_str()))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.help_str()
            .map(|help| Box::new(help) as Box<dyn fmt::Display>)
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        None
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        None
    }
}

/// Convert a [`CipherflowError`] into a reportable diagnostic.
pub fn to_reportable(err: &CipherflowError) -> ErrorAdapter<'_> {
    ErrorAdapter(err)
}
