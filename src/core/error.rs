use thiserror::Error;

/// The primary error type for all fallible operations in this crate.
#[derive(Debug, Error)]
pub enum MwError {
    /// An error occurred during an HTTP request.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A provided URL could not be parsed.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// The server returned an unexpected or unsuccessful HTTP status code.
    #[error("Unexpected response status: {status} at {url}")]
    Status {
        /// The HTTP status code.
        status: u16,
        /// The URL that returned the error.
        url: String,
    },

    /// An upstream fetch failed before any status could be checked (timeout,
    /// refused connection, broken body).
    #[error(transparent)]
    Fetch(FetchFailure),

    /// A feed document was not well-formed XML.
    #[error("Feed parse error: {0}")]
    Feed(String),

    /// The upstream answered but the data required for the operation was not there
    /// (e.g. the constituents page carries no symbol table).
    #[error("Data unavailable: {0}")]
    DataUnavailable(String),

    /// A builder or call was given parameters it cannot work with.
    #[error("Invalid parameters: {0}")]
    InvalidParams(String),
}

/// Why a single upstream fetch produced no bytes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FailureReason {
    /// The upstream answered with a non-success status code.
    #[error("status {0}")]
    Status(u16),
    /// The request exceeded its timeout.
    #[error("timed out")]
    Timeout,
    /// The connection could not be established (refused, DNS, TLS).
    #[error("connect failed")]
    Connect,
    /// The status was fine but reading the body failed.
    #[error("body read failed: {0}")]
    Body(String),
    /// Any other transport-level failure.
    #[error("transport error: {0}")]
    Transport(String),
}

/// A classified fetch failure, carrying the offending URL.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("fetch of {url} failed: {reason}")]
pub struct FetchFailure {
    /// The URL that was requested.
    pub url: String,
    /// What went wrong.
    pub reason: FailureReason,
}

impl FetchFailure {
    pub(crate) fn new(url: impl Into<String>, reason: FailureReason) -> Self {
        Self {
            url: url.into(),
            reason,
        }
    }

    pub(crate) fn from_reqwest(url: &str, err: &reqwest::Error) -> Self {
        let reason = if err.is_timeout() {
            FailureReason::Timeout
        } else if err.is_connect() {
            FailureReason::Connect
        } else if err.is_body() || err.is_decode() {
            FailureReason::Body(err.to_string())
        } else {
            FailureReason::Transport(err.to_string())
        };
        Self::new(url, reason)
    }
}

impl From<FetchFailure> for MwError {
    fn from(failure: FetchFailure) -> Self {
        match failure.reason {
            FailureReason::Status(status) => MwError::Status {
                status,
                url: failure.url,
            },
            _ => MwError::Fetch(failure),
        }
    }
}
