//! The inbound side: where simulation results come from.
//!
//! The simulation service itself is an external collaborator. This module
//! defines the request ([`Credentials`]), the failure taxonomy
//! ([`FetchError`]), the response decoding rules ([`parse_response`]) and a
//! [`SimulationSource`] trait with a file-backed implementation for recorded
//! responses.

use std::{
    fmt,
    future::Future,
    path::{Path, PathBuf},
};

use log::{debug, info, warn};
use serde_json::Value;
use thiserror::Error;

use crate::model::SimulationResult;

/// Why a simulation result could not be obtained.
///
/// Every variant is fatal to the run: nothing is built or animated.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request did not complete or the service rejected it.
    #[error("Simulation request failed: {0}")]
    Failure(String),

    /// The response was readable but lacks required fields.
    #[error("Malformed simulation result: {0}")]
    Malformed(String),

    /// Username or password was empty; the service refuses such requests.
    #[error("Missing credentials")]
    MissingCredentials,
}

/// Username and password submitted to the simulation service.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    username: String,
    password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    /// Rejects empty usernames or passwords.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::MissingCredentials`] when either field is empty.
    pub fn validate(&self) -> Result<(), FetchError> {
        if self.username.is_empty() || self.password.is_empty() {
            return Err(FetchError::MissingCredentials);
        }
        Ok(())
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Anything that turns credentials into a [`SimulationResult`].
///
/// Implementations run on the single-threaded animation runtime, so the
/// returned future is not required to be `Send`.
pub trait SimulationSource {
    fn simulate(
        &self,
        credentials: &Credentials,
    ) -> impl Future<Output = Result<SimulationResult, FetchError>>;
}

/// Decodes a response body from the simulation service.
///
/// - A body that is not JSON is a [`FetchError::Failure`].
/// - An object carrying an `"error"` string is the service's rejection shape
///   and also a [`FetchError::Failure`].
/// - Anything else must deserialize into a complete [`SimulationResult`];
///   missing or mistyped fields are a [`FetchError::Malformed`].
///
/// # Errors
///
/// See above.
pub fn parse_response(body: &str) -> Result<SimulationResult, FetchError> {
    let value: Value = serde_json::from_str(body)
        .map_err(|err| FetchError::Failure(format!("response is not valid JSON: {err}")))?;

    if let Some(message) = value.get("error").and_then(Value::as_str) {
        warn!(message; "Simulation service rejected the request");
        return Err(FetchError::Failure(message.to_string()));
    }

    serde_json::from_value(value).map_err(|err| FetchError::Malformed(err.to_string()))
}

/// Serves a recorded simulation response from disk.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SimulationSource for JsonFileSource {
    async fn simulate(&self, credentials: &Credentials) -> Result<SimulationResult, FetchError> {
        credentials.validate()?;

        info!(
            path = self.path.display().to_string(),
            username = credentials.username();
            "Loading recorded simulation result"
        );

        let body = tokio::fs::read_to_string(&self.path).await.map_err(|err| {
            FetchError::Failure(format!("cannot read {}: {err}", self.path.display()))
        })?;

        let result = parse_response(&body)?;
        debug!("Simulation result decoded");
        Ok(result)
    }
}
