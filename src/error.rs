use std::fmt;
use std::io;
use std::path::PathBuf;

/// Error type for map, sprite and resource loading.
#[derive(Debug)]
pub enum Error {
    /// A resource is missing, has the wrong type, or its contents are inconsistent
    InvalidResource {
        /// Name the resource was requested under
        name: String,
        /// What is wrong with it
        reason: String,
    },
    /// File I/O error
    Io {
        /// File that could not be read
        path: PathBuf,
        /// Underlying error
        source: io::Error,
    },
    /// JSON parse error
    Json {
        /// File that failed to parse
        path: PathBuf,
        /// Underlying error
        source: serde_json::Error,
    },
    /// Unsupported file format (non-JSON)
    UnsupportedFormat(String),
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn invalid(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::InvalidResource {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidResource { name, reason } => {
                write!(f, "Invalid resource '{}': {}", name, reason)
            }
            Error::Io { path, source } => write!(f, "I/O error on {}: {}", path.display(), source),
            Error::Json { path, source } => {
                write!(f, "Failed to parse JSON in {}: {}", path.display(), source)
            }
            Error::UnsupportedFormat(ext) => write!(f, "Unsupported file format: {}", ext),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io { source, .. } => Some(source),
            Error::Json { source, .. } => Some(source),
            _ => None,
        }
    }
}
