//! Invocation counts for listeners.
//!
//! A listener either fires a fixed number of times and then removes itself,
//! or stays registered until it is explicitly removed. `Count` makes that
//! choice explicit instead of overloading a number with an infinity sentinel.
//!
//! Loosely typed inputs (signed integers, floats, JSON values) are validated
//! through [`IntoCount`], which is where registration errors originate.

use std::fmt;
use std::num::{NonZeroU32, NonZeroU64};

use crate::error::ValidationError;

/// How many more times a listener may fire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Count {
    /// Fire this many more times, then remove the listener.
    Times(NonZeroU64),

    /// Never expire.
    #[default]
    Unbounded,
}

impl Count {
    /// A single invocation.
    pub const ONCE: Self = Self::Times(NonZeroU64::MIN);

    /// Creates a bounded count, rejecting zero.
    pub fn times(n: u64) -> Result<Self, ValidationError> {
        NonZeroU64::new(n)
            .map(Self::Times)
            .ok_or_else(|| ValidationError::out_of_range(n))
    }

    /// Returns true if this count never expires.
    #[must_use]
    pub const fn is_unbounded(self) -> bool {
        matches!(self, Self::Unbounded)
    }

    /// Remaining invocations, or `None` when unbounded.
    #[must_use]
    pub const fn remaining(self) -> Option<u64> {
        match self {
            Self::Times(n) => Some(n.get()),
            Self::Unbounded => None,
        }
    }

    /// Uses up one invocation.
    ///
    /// Returns the count left afterwards, or `None` once it is exhausted.
    #[must_use]
    pub(crate) fn consume(self) -> Option<Self> {
        match self {
            Self::Times(n) => NonZeroU64::new(n.get() - 1).map(Self::Times),
            Self::Unbounded => Some(Self::Unbounded),
        }
    }
}

impl fmt::Display for Count {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Times(n) => write!(f, "{n}"),
            Self::Unbounded => write!(f, "unbounded"),
        }
    }
}

impl From<NonZeroU64> for Count {
    fn from(n: NonZeroU64) -> Self {
        Self::Times(n)
    }
}

impl From<NonZeroU32> for Count {
    fn from(n: NonZeroU32) -> Self {
        Self::Times(n.into())
    }
}

/// Conversion into a validated [`Count`].
///
/// Implemented for `Count` itself, the non-zero integer types (infallible),
/// plain integers and floats (validated), `Option<T>` (`None` means
/// unbounded) and `serde_json::Value` for dynamically typed callers.
pub trait IntoCount {
    /// Validates `self` and converts it into a `Count`.
    fn into_count(self) -> Result<Count, ValidationError>;
}

impl IntoCount for Count {
    fn into_count(self) -> Result<Count, ValidationError> {
        Ok(self)
    }
}

impl IntoCount for NonZeroU64 {
    fn into_count(self) -> Result<Count, ValidationError> {
        Ok(self.into())
    }
}

impl IntoCount for NonZeroU32 {
    fn into_count(self) -> Result<Count, ValidationError> {
        Ok(self.into())
    }
}

impl IntoCount for u64 {
    fn into_count(self) -> Result<Count, ValidationError> {
        Count::times(self)
    }
}

impl IntoCount for u32 {
    fn into_count(self) -> Result<Count, ValidationError> {
        Count::times(u64::from(self))
    }
}

impl IntoCount for usize {
    fn into_count(self) -> Result<Count, ValidationError> {
        u64::try_from(self)
            .map_err(|_| ValidationError::out_of_range(self))
            .and_then(Count::times)
    }
}

impl IntoCount for i64 {
    fn into_count(self) -> Result<Count, ValidationError> {
        u64::try_from(self)
            .map_err(|_| ValidationError::out_of_range(self))
            .and_then(Count::times)
    }
}

impl IntoCount for i32 {
    fn into_count(self) -> Result<Count, ValidationError> {
        i64::from(self).into_count()
    }
}

// 2^64, the first float that no longer fits in a u64.
const U64_LIMIT: f64 = 18_446_744_073_709_551_616.0;

impl IntoCount for f64 {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn into_count(self) -> Result<Count, ValidationError> {
        if self.is_nan() {
            return Err(ValidationError::not_numeric("NaN"));
        }
        if self == f64::INFINITY {
            return Ok(Count::Unbounded);
        }
        if self.fract() != 0.0 || self < 1.0 || self >= U64_LIMIT {
            return Err(ValidationError::out_of_range(self));
        }
        Count::times(self as u64)
    }
}

impl<T: IntoCount> IntoCount for Option<T> {
    fn into_count(self) -> Result<Count, ValidationError> {
        self.map_or(Ok(Count::Unbounded), IntoCount::into_count)
    }
}

impl IntoCount for &serde_json::Value {
    fn into_count(self) -> Result<Count, ValidationError> {
        use serde_json::Value;

        match self {
            // JSON has no "undefined"; a null count is an omitted count.
            Value::Null => Ok(Count::Unbounded),
            Value::Number(n) => {
                if let Some(u) = n.as_u64() {
                    u.into_count()
                } else if let Some(i) = n.as_i64() {
                    i.into_count()
                } else if let Some(f) = n.as_f64() {
                    f.into_count()
                } else {
                    Err(ValidationError::out_of_range(n))
                }
            }
            Value::Bool(_) => Err(ValidationError::not_numeric("bool")),
            Value::String(_) => Err(ValidationError::not_numeric("string")),
            Value::Array(_) => Err(ValidationError::not_numeric("array")),
            Value::Object(_) => Err(ValidationError::not_numeric("object")),
        }
    }
}

impl IntoCount for serde_json::Value {
    fn into_count(self) -> Result<Count, ValidationError> {
        (&self).into_count()
    }
}
