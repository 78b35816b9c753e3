//! Contract violations raised by item and catalog operations.

use thiserror::Error;

/// A required argument was empty or an item would break its invariants.
///
/// Business misses (borrowing a missing or already borrowed item) are not
/// errors; those come back as `Ok(false)` from the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl ValidationError {
    /// Error for a required field that was left empty
    pub fn empty(field: &str) -> Self {
        Self::InvalidArgument(format!("{} cannot be empty", field))
    }
}

/// Return the value if it is non-empty, otherwise an `InvalidArgument` naming the field
pub(crate) fn require(field: &str, value: String) -> Result<String, ValidationError> {
    if value.is_empty() {
        Err(ValidationError::empty(field))
    } else {
        Ok(value)
    }
}

/// Borrowed-string variant of [`require`] for operation arguments
pub(crate) fn require_str(field: &str, value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        Err(ValidationError::empty(field))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_rejects_empty() {
        let err = require("Title", String::new()).unwrap_err();
        assert_eq!(
            err,
            ValidationError::InvalidArgument("Title cannot be empty".to_string())
        );
        assert_eq!(err.to_string(), "Invalid argument: Title cannot be empty");
    }

    #[test]
    fn test_require_passes_value_through() {
        assert_eq!(require("Title", "Dune".to_string()).unwrap(), "Dune");
        assert!(require_str("Identifier", "abc").is_ok());
        assert!(require_str("Identifier", "").is_err());
    }
}
