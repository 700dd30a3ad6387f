use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using the library's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types produced while resolving options and counting words.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// A configuration field failed validation.
    #[error("Invalid configuration: {message}")]
    Validation {
        /// Human-readable cause
        message: String,
    },

    /// One or more requested word modifications are not known.
    #[error("Unknown handlers list: {}", .names.join(", "))]
    UnknownHandlers {
        /// Every unrecognized name, in request order
        names: Vec<String>,
    },

    /// IO error with context about the file path.
    #[error("IO error accessing '{path}': {message}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// Error message
        message: String,
    },

    /// Input file is not valid UTF-8 text.
    #[error("Invalid UTF-8 encoding in file '{path}'. The input must be UTF-8 text.")]
    InvalidUtf8 {
        /// Path to file with encoding issues
        path: PathBuf,
    },

    /// Raw arguments could not be parsed at all.
    #[error("Failed to parse arguments: {message}")]
    Parse {
        /// Error message
        message: String,
    },
}

impl Error {
    /// Creates a validation error.
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Creates an unknown handlers error.
    #[must_use]
    pub fn unknown_handlers(names: Vec<String>) -> Self {
        Self::UnknownHandlers { names }
    }

    /// Creates an IO error with path context.
    #[must_use]
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            message: source.to_string(),
        }
    }

    /// Creates an invalid UTF-8 error.
    #[must_use]
    pub fn invalid_utf8(path: impl Into<PathBuf>) -> Self {
        Self::InvalidUtf8 { path: path.into() }
    }

    /// Creates a parse error.
    #[must_use]
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }

    /// Returns true if this is a validation failure of any kind.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. } | Self::UnknownHandlers { .. })
    }

    /// Returns true if this is an IO error.
    #[must_use]
    pub const fn is_io(&self) -> bool {
        matches!(self, Self::Io { .. })
    }

    /// Returns true if the input file could not be decoded as UTF-8.
    #[must_use]
    pub const fn is_invalid_utf8(&self) -> bool {
        matches!(self, Self::InvalidUtf8 { .. })
    }

    /// Returns the unrecognized handler names, if this is a handler error.
    #[must_use]
    pub fn unknown_names(&self) -> Option<&[String]> {
        match self {
            Self::UnknownHandlers { names } => Some(names),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error() {
        let err = Error::validation("Image size must be greater than zero!");
        assert!(err.is_validation());
        assert!(!err.is_io());
        assert!(err.to_string().contains("Image size must be greater than zero"));
    }

    #[test]
    fn test_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = Error::io("/tmp/words.txt", io_err);
        assert!(err.is_io());
        assert!(err.to_string().contains("/tmp/words.txt"));
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_unknown_handlers_lists_every_name() {
        let err = Error::unknown_handlers(vec!["foo".to_string(), "bar".to_string()]);
        assert!(err.is_validation());
        assert_eq!(err.to_string(), "Unknown handlers list: foo, bar");
        assert_eq!(
            err.unknown_names(),
            Some(&["foo".to_string(), "bar".to_string()][..])
        );
    }

    #[test]
    fn test_invalid_utf8_error() {
        let err = Error::invalid_utf8("/tmp/latin1.txt");
        assert!(err.is_invalid_utf8());
        assert!(!err.is_io());
        assert!(!err.is_validation());
        assert!(err.to_string().contains("/tmp/latin1.txt"));
    }

    #[test]
    fn test_parse_error() {
        let err = Error::parse("unexpected argument");
        assert!(!err.is_validation());
        assert!(err.unknown_names().is_none());
        assert!(err.to_string().starts_with("Failed to parse arguments"));
    }

    #[test]
    fn test_error_clone() {
        let err = Error::validation("test");
        let cloned = err.clone();
        assert_eq!(err, cloned);
    }
}
