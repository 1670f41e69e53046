//! Error type shared by every file-service adapter.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Failure reported by a [`crate::FileStorageService`] or [`crate::FileViewer`].
///
/// The upload runtime never shows these to the user; they are logged and flattened into a fixed
/// notification text. Network failures and server-reported failures are distinct here only for
/// diagnostics.
pub enum ServiceError {
    /// The request never produced an HTTP response.
    #[error("request to `{url}` failed: {message}")]
    Network {
        /// Request URL.
        url: String,
        /// Transport error description.
        message: String,
    },
    /// The server answered with a non-2xx status.
    #[error("`{url}` responded with status {status}")]
    Status {
        /// Request URL.
        url: String,
        /// HTTP status code.
        status: u16,
    },
    /// The response body could not be decoded into the expected shape.
    #[error("failed to decode response from `{url}`: {message}")]
    Decode {
        /// Request URL.
        url: String,
        /// Decoder error description.
        message: String,
    },
    /// The record carries no storage key, so there is nothing to download.
    #[error("file has no storage key")]
    MissingStorageKey,
    /// The local viewer could not present the downloaded payload.
    #[error("file viewer failed: {0}")]
    Viewer(String),
    /// The operation needs a browser host that this build target does not have.
    #[error("{0} is only available when compiled for wasm32")]
    Unavailable(&'static str),
    /// Deliberate failure injected by an in-memory adapter.
    #[error("simulated failure: {0}")]
    Simulated(String),
}

impl ServiceError {
    /// Builds a [`ServiceError::Network`] from any displayable transport error.
    pub fn network(url: impl Into<String>, err: impl std::fmt::Display) -> Self {
        Self::Network {
            url: url.into(),
            message: err.to_string(),
        }
    }

    /// Builds a [`ServiceError::Decode`] from any displayable decoder error.
    pub fn decode(url: impl Into<String>, err: impl std::fmt::Display) -> Self {
        Self::Decode {
            url: url.into(),
            message: err.to_string(),
        }
    }

    /// Returns the HTTP status when the server rejected the request.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_url_and_status() {
        let err = ServiceError::Status {
            url: "http://localhost:5000/files".to_string(),
            status: 503,
        };
        assert_eq!(
            err.to_string(),
            "`http://localhost:5000/files` responded with status 503"
        );
        assert_eq!(err.status(), Some(503));
        assert_eq!(ServiceError::MissingStorageKey.status(), None);
    }
}
