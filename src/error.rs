//! Error taxonomy shared by the CLI and the form server.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::config::ConfigError;

#[derive(Debug, Error)]
pub enum NotesError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A required parameter was missing; raised before any network call.
    #[error("{0}")]
    Validation(String),

    #[error("making request: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("API error: status {status}, body: {body}")]
    RemoteApi { status: u16, body: String },

    #[error("decoding response: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("marshalling request body: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl NotesError {
    pub fn validation(msg: impl Into<String>) -> Self {
        NotesError::Validation(msg.into())
    }

    /// HTTP status used when the error ends a form-server request.
    pub fn status_code(&self) -> StatusCode {
        match self {
            NotesError::Validation(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for NotesError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        (status, self.to_string()).into_response()
    }
}
