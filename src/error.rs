//! Error types for vertebrate.
//!
//! All errors are strongly typed using thiserror. Only registration can fail;
//! removal and dispatch absorb stale handles and unknown event names.

use thiserror::Error;

/// Validation errors raised when registering a listener.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The count was supplied but is not a number at all.
    #[error("Count must be a number, got {found}")]
    CountNotNumeric {
        /// Kind of value that was supplied instead.
        found: String,
    },

    /// The count is numeric but not a positive integer (or unbounded).
    #[error("Count must be a positive integer or unbounded, got {count}")]
    CountOutOfRange {
        /// The rejected count, as written.
        count: String,
    },
}

impl ValidationError {
    pub(crate) fn not_numeric(found: impl Into<String>) -> Self {
        Self::CountNotNumeric {
            found: found.into(),
        }
    }

    pub(crate) fn out_of_range(count: impl ToString) -> Self {
        Self::CountOutOfRange {
            count: count.to_string(),
        }
    }

    /// Returns true for the type-violation kind (wrong kind of value).
    #[must_use]
    pub const fn is_type_violation(&self) -> bool {
        matches!(self, Self::CountNotNumeric { .. })
    }

    /// Returns true for the range-violation kind (right kind, illegal value).
    #[must_use]
    pub const fn is_range_violation(&self) -> bool {
        matches!(self, Self::CountOutOfRange { .. })
    }
}

/// Top-level error type for vertebrate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EmitterError {
    /// A registration argument was rejected.
    #[error("Invalid argument: {0}")]
    Validation(#[from] ValidationError),
}

impl EmitterError {
    /// Returns true if this is a validation error.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Returns true if the offending value had the wrong type.
    #[must_use]
    pub const fn is_type_violation(&self) -> bool {
        match self {
            Self::Validation(e) => e.is_type_violation(),
        }
    }

    /// Returns true if the offending value had the right type but an illegal value.
    #[must_use]
    pub const fn is_range_violation(&self) -> bool {
        match self {
            Self::Validation(e) => e.is_range_violation(),
        }
    }

    /// Registration failures are caller mistakes; retrying the same call fails again.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        false
    }
}

/// Result type alias for emitter operations.
pub type EmitterResult<T> = Result<T, EmitterError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_not_numeric() {
        let err = ValidationError::not_numeric("string");
        let msg = format!("{err}");
        assert!(msg.contains("must be a number"));
        assert!(msg.contains("string"));
        assert!(err.is_type_violation());
        assert!(!err.is_range_violation());
    }

    #[test]
    fn test_validation_error_out_of_range() {
        let err = ValidationError::out_of_range(1.5);
        let msg = format!("{err}");
        assert!(msg.contains("1.5"));
        assert!(msg.contains("positive integer"));
        assert!(err.is_range_violation());
        assert!(!err.is_type_violation());
    }

    #[test]
    fn test_emitter_error_from_validation() {
        let err: EmitterError = ValidationError::out_of_range(0).into();
        assert!(err.is_validation());
        assert!(err.is_range_violation());
        assert!(!err.is_type_violation());
        assert!(!err.is_retryable());
        assert!(format!("{err}").starts_with("Invalid argument"));
    }

    #[test]
    fn test_emitter_error_type_violation() {
        let err: EmitterError = ValidationError::not_numeric("bool").into();
        assert!(err.is_type_violation());
        assert!(!err.is_range_violation());
    }
}
