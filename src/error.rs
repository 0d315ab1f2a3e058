//! Error types for the aadsync tool.
//!
//! Uses `thiserror` for library-style errors with automatic `Display` and `Error` implementations.

use thiserror::Error;

/// Top-level application error type.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Authentication error: {0}")]
    Auth(#[from] AuthError),

    #[error("{0}")]
    NotFound(#[from] NotFoundError),

    #[error("Graph API error: {0}")]
    Remote(#[from] RemoteError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Authentication-related errors.
#[derive(Error, Debug)]
pub enum AuthError {
    /// The token endpoint rejected the client-credentials exchange.
    /// Carries the remote status and body unmodified.
    #[error("token request failed: HTTP {status} - {body}")]
    TokenRequestFailed { status: u16, body: String },

    #[error("token request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("malformed token response: {0}")]
    MalformedResponse(String),
}

/// The configured display-name prefix matched no service principal.
#[derive(Error, Debug)]
#[error("no service principal found with display name prefix '{0}'")]
pub struct NotFoundError(pub String);

/// Errors from directory-API calls (list/add/remove).
///
/// Never retried and never classified further; any non-success status is
/// fatal to the run.
#[derive(Error, Debug)]
pub enum RemoteError {
    #[error("request failed: HTTP {status} - {body}")]
    RequestFailed { status: u16, body: String },

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("failed to parse API response: {0}")]
    MalformedResponse(String),
}

/// Settings or desired-state input errors. Raised before any remote call.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{0}")]
    Missing(String),

    #[error("failed to read state file {path}: {source}")]
    StateFileRead {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to parse state file {path}: {source}")]
    StateFileParse {
        path: String,
        source: serde_json::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_error_carries_status_and_body() {
        let err = RemoteError::RequestFailed {
            status: 409,
            body: "assignment already exists".into(),
        };
        let text = err.to_string();
        assert!(text.contains("409"));
        assert!(text.contains("assignment already exists"));
    }

    #[test]
    fn test_not_found_names_the_prefix() {
        let err = AppError::from(NotFoundError("team-app".into()));
        assert!(err.to_string().contains("team-app"));
    }
}
