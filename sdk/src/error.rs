//! Error types for the invoicing API client.
//!
//! # Design
//! One flat `ApiError` covers every failure origin. Not-found and
//! validation failures both arrive as `Http` carrying the status the
//! server sent; callers branch on that status (`status()`,
//! `is_not_found()`) rather than on a richer variant set, because the
//! wire contract exposes nothing richer. Absence from a natural-key
//! lookup is not an error at all; those helpers return `Ok(None)`.

use std::fmt;

/// Errors returned by transport and resource operations.
#[derive(Debug)]
pub enum ApiError {
    /// The request never produced an HTTP response (DNS failure, refused
    /// connection, timeout).
    Transport(String),

    /// The server responded with a non-2xx status. `body` is the raw
    /// response text, which usually carries the server's validation
    /// message.
    Http { status: u16, body: String },

    /// The request payload could not be serialized to JSON.
    Serialization(String),

    /// The response body could not be deserialized into the expected type.
    Deserialization(String),
}

impl ApiError {
    /// HTTP status carried by this error, if the server got far enough to
    /// send one.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// True when the server reported 404 for the requested resource.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Transport(msg) => write!(f, "transport failure: {msg}"),
            ApiError::Http { status, body } => write!(f, "HTTP {status}: {body}"),
            ApiError::Serialization(msg) => write!(f, "serialization failed: {msg}"),
            ApiError::Deserialization(msg) => {
                write!(f, "deserialization failed: {msg}")
            }
        }
    }
}

impl std::error::Error for ApiError {}
