use std::fmt;

/// Result type for bootboard-types operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while building query values
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Query parameter outside its allowed domain
    InvalidQuery(String),

    /// Date range that is neither a day count nor `max`
    InvalidDateRange(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidQuery(msg) => write!(f, "Invalid query: {}", msg),
            Error::InvalidDateRange(value) => {
                write!(f, "Invalid date range '{}': expected days or 'max'", value)
            }
        }
    }
}

impl std::error::Error for Error {}

/// Failure of a single page request.
///
/// An empty result set is not a fetch failure; the aggregation run reports
/// it as its own outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// Network failure or non-2xx response. `status` is `None` when no HTTP
    /// response was received at all.
    Transport {
        status: Option<u16>,
        message: String,
    },

    /// Response body is not a valid result page
    Malformed(String),
}

impl FetchError {
    pub fn transport(status: Option<u16>, message: impl Into<String>) -> Self {
        FetchError::Transport {
            status,
            message: message.into(),
        }
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        FetchError::Malformed(message.into())
    }

    /// HTTP status code, when the failure came from a response.
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::Transport { status, .. } => *status,
            FetchError::Malformed(_) => None,
        }
    }
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::Transport {
                status: Some(code),
                message,
            } => write!(f, "HTTP {}: {}", code, message),
            FetchError::Transport {
                status: None,
                message,
            } => write!(f, "Transport error: {}", message),
            FetchError::Malformed(msg) => write!(f, "Malformed response: {}", msg),
        }
    }
}

impl std::error::Error for FetchError {}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::Malformed(err.to_string())
    }
}
