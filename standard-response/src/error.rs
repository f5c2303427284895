//! Error types for configuration, producers and key conversion

use std::fmt;

use thiserror::Error;

use crate::alias::{CanonicalField, OwnerType};

/// Result type alias using the crate error
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the crate
///
/// Large error variants are boxed to reduce stack size
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(Box<figment::Error>),

    /// A response producer returned an error
    #[error("Producer failed: {0}")]
    Producer(String),

    /// A response producer panicked
    #[error("Producer panicked: {0}")]
    Panic(String),

    /// Owner type text could not be parsed (expected `Kind` or `Kind<Element>`)
    #[error("Invalid owner type: {0}")]
    InvalidOwnerType(String),

    /// Unknown case convention name
    #[error("Invalid case convention: {0}")]
    InvalidCaseConvention(String),

    /// JSON serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Stable machine-readable code for this error
    ///
    /// # Example
    ///
    /// ```rust
    /// use standard_response::Error;
    ///
    /// let error = Error::Producer("backend unavailable".to_string());
    /// assert_eq!(error.code(), "PRODUCER_ERROR");
    /// ```
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Config(_) => "CONFIG_ERROR",
            Self::Producer(_) => "PRODUCER_ERROR",
            Self::Panic(_) => "PRODUCER_PANIC",
            Self::InvalidOwnerType(_) => "INVALID_OWNER_TYPE",
            Self::InvalidCaseConvention(_) => "INVALID_CASE_CONVENTION",
            Self::Serialization(_) => "SERIALIZATION_ERROR",
        }
    }
}

// Manual From implementations for boxed errors
impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Error::Config(Box::new(err))
    }
}

/// Two fields of one record resolved to the same output key
///
/// Not fatal: the conversion keeps the value of the field declared last.
/// The conflict is returned by
/// [`convert_key_with_report`](crate::convert::convert_key_with_report) so
/// that alias authoring mistakes can be surfaced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyConflict {
    /// Owner of the conflicting fields
    pub owner: OwnerType,
    /// The output key both fields resolved to
    pub output: String,
    /// The field whose value was replaced
    pub overwritten: String,
    /// The field whose value was kept
    pub kept: String,
}

impl KeyConflict {
    /// Canonical identities of both fields involved
    #[must_use]
    pub fn fields(&self) -> (CanonicalField, CanonicalField) {
        (
            CanonicalField::new(self.owner.clone(), self.overwritten.clone()),
            CanonicalField::new(self.owner.clone(), self.kept.clone()),
        )
    }
}

impl fmt::Display for KeyConflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: fields '{}' and '{}' both resolve to key '{}'",
            self.owner, self.overwritten, self.kept, self.output
        )
    }
}

impl std::error::Error for KeyConflict {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = Error::InvalidOwnerType("Items<".to_string());
        assert_eq!(error.to_string(), "Invalid owner type: Items<");
        assert_eq!(error.code(), "INVALID_OWNER_TYPE");
    }

    #[test]
    fn test_serialization_error_from() {
        let err = serde_json::from_str::<u32>("not json").unwrap_err();
        let error: Error = err.into();
        assert!(matches!(error, Error::Serialization(_)));
    }

    #[test]
    fn test_key_conflict_display() {
        let conflict = KeyConflict {
            owner: OwnerType::new("PageInfo"),
            output: "page".to_string(),
            overwritten: "current".to_string(),
            kept: "size".to_string(),
        };
        assert_eq!(
            conflict.to_string(),
            "PageInfo: fields 'current' and 'size' both resolve to key 'page'"
        );
        let (first, second) = conflict.fields();
        assert_eq!(first.field, "current");
        assert_eq!(second.field, "size");
    }
}
