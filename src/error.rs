//! Error types shared by the authorization flow, the API client and the
//! aggregation step.

use std::time::Duration;

use thiserror::Error;

/// Errors that can occur while authenticating against or reading from Spotify.
///
/// None of these are fatal to the process: every variant can be recovered
/// from by starting the authorization flow again.
#[derive(Debug, Error)]
pub enum Error {
    /// No verifier was persisted before the token exchange, or it was
    /// already consumed by an earlier exchange.
    #[error("No PKCE code verifier found. Run `sportop auth` to start a new authorization")]
    MissingVerifier,

    /// The token endpoint rejected the exchange or answered with a body that
    /// does not contain an access token.
    #[error("Token exchange failed ({status}): {body}")]
    TokenExchange {
        /// HTTP status returned by the token endpoint.
        status: u16,
        /// Raw response body for diagnostics.
        body: String,
    },

    /// The access token is invalid or expired.
    #[error("Access token rejected (401). Run `sportop auth` again")]
    Unauthorized,

    /// A resource endpoint answered with a non-success status other than 401.
    #[error("Spotify API error ({status}): {body}")]
    ResourceFetch { status: u16, body: String },

    /// An average was requested over a page whose divisor is zero.
    #[error("Cannot average {field}: divisor is zero")]
    DivisionByZero { field: &'static str },

    /// A network operation exceeded its bound.
    #[error("Operation timed out after {0:?}")]
    Timeout(Duration),

    /// Verifier length outside the range RFC 7636 allows.
    #[error("Invalid code verifier length {0}, must be between 43 and 128")]
    InvalidVerifierLength(usize),

    /// A required configuration value is not set.
    #[error("{0} must be set")]
    MissingConfig(&'static str),

    /// A configuration value is set but unusable.
    #[error("Invalid value {value:?} for {key}: {reason}")]
    InvalidConfig {
        key: &'static str,
        value: String,
        reason: &'static str,
    },

    /// The authorization server redirected back with `error=` instead of `code=`.
    #[error("Authorization denied: {0}")]
    AuthorizationDenied(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Maps a transport error, turning client timeouts into [`Error::Timeout`].
    pub fn from_transport(err: reqwest::Error, timeout: Duration) -> Self {
        if err.is_timeout() {
            Error::Timeout(timeout)
        } else {
            Error::Http(err)
        }
    }
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;
