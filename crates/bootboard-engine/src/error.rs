use std::fmt;

/// Result type for bootboard-engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types raised by table configuration and URL templates
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Malformed path template
    Template(String),

    /// Column index outside the table
    ColumnOutOfRange(usize),

    /// Sort requested on a column declared non-orderable
    NotOrderable(usize),

    /// Page length of zero
    InvalidPageLength,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Template(msg) => write!(f, "Invalid URL template: {}", msg),
            Error::ColumnOutOfRange(idx) => write!(f, "Column {} does not exist", idx),
            Error::NotOrderable(idx) => write!(f, "Column {} is not orderable", idx),
            Error::InvalidPageLength => write!(f, "Page length must be greater than 0"),
        }
    }
}

impl std::error::Error for Error {}
