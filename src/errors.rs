//! Typed error hierarchy for taskdeck.
//!
//! Two enums cover the two failure domains:
//! - `GenerateError` — ticket generation against the completion provider
//! - `ClientError` — client-side API calls (transport and non-2xx replies)
//!
//! Store not-found conditions are plain `Option`/`bool` returns and become
//! HTTP 404s at the API boundary.

use thiserror::Error;

/// Errors from the ticket generation service.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("Prompt is required")]
    EmptyPrompt,

    #[error("Provider request failed: {0}")]
    Provider(#[from] reqwest::Error),

    #[error("Provider returned no content")]
    MissingContent,

    #[error("Provider returned malformed ticket JSON: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Errors from the client-side API layer.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("API error ({status}): {message}")]
    Api {
        status: reqwest::StatusCode,
        message: String,
    },
}

impl ClientError {
    /// True if the server replied with 404 for the addressed ticket.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::Api { status, .. } if *status == reqwest::StatusCode::NOT_FOUND)
    }
}
