//! Error types shared by the collator and the era calendars.

use thiserror::Error;

/// Errors raised by [`crate::compare`] and [`crate::calendar`] operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GlobalizationError {
    #[error("Value cannot be null: {param}")]
    NullArgument { param: &'static str },

    #[error("Invalid argument {param}: {reason}")]
    InvalidArgument { param: &'static str, reason: String },

    #[error("Argument out of range {param}: {reason}")]
    OutOfRange { param: &'static str, reason: String },

    #[error("Era value was not valid: {0}")]
    InvalidEra(i32),

    #[error("Culture is not supported: {0:?}")]
    CultureNotFound(String),

    #[error("Collation data unavailable: {0}")]
    CollationData(String),
}

impl GlobalizationError {
    pub(crate) fn null(param: &'static str) -> Self {
        Self::NullArgument { param }
    }

    pub(crate) fn invalid(param: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            param,
            reason: reason.into(),
        }
    }

    pub(crate) fn out_of_range(param: &'static str, reason: impl Into<String>) -> Self {
        Self::OutOfRange {
            param,
            reason: reason.into(),
        }
    }

    pub fn is_null_argument(&self) -> bool {
        matches!(self, Self::NullArgument { .. })
    }

    /// True for every error a caller would see as a bad argument value,
    /// including an unknown culture name.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            Self::InvalidArgument { .. } | Self::CultureNotFound(_)
        )
    }

    pub fn is_out_of_range(&self) -> bool {
        matches!(self, Self::OutOfRange { .. })
    }

    pub fn is_invalid_era(&self) -> bool {
        matches!(self, Self::InvalidEra(_))
    }
}

pub type Result<T> = std::result::Result<T, GlobalizationError>;
