//! Unified error type for decoding, encoding, and validating generator data.

use thiserror::Error;

use crate::common::DateTimeParseError;

/// Unified error type for all crate operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GeneratorError {
    /// Input is not well-formed JSON (including truncated input)
    #[error("Malformed JSON at line {line}, column {column}: {message}")]
    Syntax {
        line: usize,
        column: usize,
        message: String,
    },

    /// A present field's value does not fit its declared type
    #[error("Schema mismatch at `{path}`: {message}")]
    SchemaMismatch { path: String, message: String },

    /// No accepted date/time pattern matched
    #[error(transparent)]
    DateTimeParse(#[from] DateTimeParseError),

    /// Query options failed validation
    #[error("Validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),

    /// The API envelope reported a failure
    #[error("API returned status `{status}`: {message}")]
    Api { status: String, message: String },

    /// Serialization failed
    #[error("Failed to encode JSON: {0}")]
    Encode(String),

    /// Unknown name for a string-backed value
    #[error("Parse error: {0}")]
    Parse(String),
}

impl GeneratorError {
    /// Create a syntax error at the given position
    pub fn syntax(line: usize, column: usize, message: impl Into<String>) -> Self {
        Self::Syntax {
            line,
            column,
            message: message.into(),
        }
    }

    /// Create a schema mismatch for the field at `path`
    pub fn schema_mismatch(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::SchemaMismatch {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Creates a validation error from one or more rule failures.
    ///
    /// Every failure is kept so callers can report them all at once:
    ///
    /// ```
    /// use gamecharacter::GeneratorError;
    ///
    /// let err = GeneratorError::validation(vec!["a".into(), "b".into()]);
    /// assert_eq!(err.to_string(), "Validation failed: a; b");
    /// ```
    pub fn validation(errors: Vec<String>) -> Self {
        Self::Validation(errors)
    }

    /// Create an API failure error
    pub fn api(status: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Api {
            status: status.into(),
            message: message.into(),
        }
    }

    /// Create an encode error
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Create a parse error
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Whether the input was rejected before any schema checks ran
    pub fn is_syntax(&self) -> bool {
        matches!(self, Self::Syntax { .. })
    }

    /// Field path for schema mismatches
    pub fn path(&self) -> Option<&str> {
        match self {
            Self::SchemaMismatch { path, .. } => Some(path),
            _ => None,
        }
    }
}
