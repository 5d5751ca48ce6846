//! Error handling for the data provider

use crate::consts::cli_consts::server::FAILURE_MESSAGE;
use crate::server::envelope::Envelope;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use std::path::PathBuf;
use thiserror::Error;

/// Every way a snapshot can be unavailable.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The snapshot file is missing or unreadable.
    #[error("Failed to read snapshot file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The snapshot document is not valid snapshot JSON.
    #[error("Invalid snapshot JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// The external command could not be started.
    #[error("Failed to spawn `{program}`: {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },

    /// The external command ran but did not succeed.
    #[error("`{program}` exited with {status}: {stderr}")]
    ProcessFailed {
        program: String,
        status: String,
        stderr: String,
    },

    /// The external command did not finish in time.
    #[error("`{program}` timed out after {secs}s")]
    Timeout { program: String, secs: u64 },
}

impl IntoResponse for ProviderError {
    fn into_response(self) -> Response {
        log::error!("Error in sentiment API: {}", self);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(Envelope::failure(FAILURE_MESSAGE)),
        )
            .into_response()
    }
}
