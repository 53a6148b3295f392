//! Error handling for the PgStay client

use std::fmt;
use thiserror::Error;

use crate::forms::ValidationErrors;

/// Message shown when neither the server nor the transport gave anything usable
pub const GENERIC_ERROR_MESSAGE: &str = "Something went wrong. Please try again.";

/// Unified error type for the PgStay client
#[derive(Error, Debug)]
pub enum Error {
    /// Local, field-level validation failure
    #[error("Validation error: {0}")]
    Validation(ValidationErrors),

    /// Transport failure, no response was received
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The server answered with a non-2xx status
    #[error("Request failed with status {status}: {body}")]
    HttpStatus {
        status: u16,
        message: Option<String>,
        body: String,
    },

    /// JSON serialization or deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing errors
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    /// Route guard rejected the current session
    #[error("Authentication error: {0}")]
    Auth(String),

    /// Invalid or missing configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// General errors
    #[error("{0}")]
    General(String),
}

impl Error {
    /// Create a new authentication error
    pub fn auth<T: fmt::Display>(msg: T) -> Self {
        Error::Auth(msg.to_string())
    }

    /// Create a new configuration error
    pub fn config<T: fmt::Display>(msg: T) -> Self {
        Error::Config(msg.to_string())
    }

    /// Create a new general error
    pub fn general<T: fmt::Display>(msg: T) -> Self {
        Error::General(msg.to_string())
    }

    /// HTTP status code, if the server answered
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// The single message a view shows for this error.
    ///
    /// A server-provided `message` wins; otherwise `fallback` is used, except
    /// for local errors that already carry a human readable text.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Error::HttpStatus {
                message: Some(message),
                ..
            } if !message.trim().is_empty() => message.clone(),
            Error::Validation(errors) => errors
                .first()
                .map(|(_, message)| message.to_string())
                .unwrap_or_else(|| fallback.to_string()),
            Error::Auth(message) => message.clone(),
            _ => fallback.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
