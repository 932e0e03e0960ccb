//! Error types for lease valuation

use thiserror::Error;

/// Result alias used throughout the crate
pub type LeaseResult<T> = Result<T, LeaseError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LeaseError {
    /// Out-of-range or malformed input field
    #[error("Invalid parameter `{field}`: {reason}")]
    InvalidParameter { field: String, reason: String },

    /// Summary requested over a projection with no rows
    #[error("Cannot summarize an empty projection")]
    EmptyProjection,
}

impl LeaseError {
    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        LeaseError::InvalidParameter {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Name of the offending field, if any
    pub fn field(&self) -> Option<&str> {
        match self {
            LeaseError::InvalidParameter { field, .. } => Some(field.as_str()),
            LeaseError::EmptyProjection => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_parameter_message() {
        let err = LeaseError::invalid("slc_nper", "must not exceed full_term (5)");
        assert_eq!(
            err.to_string(),
            "Invalid parameter `slc_nper`: must not exceed full_term (5)"
        );
        assert_eq!(err.field(), Some("slc_nper"));
    }

    #[test]
    fn test_empty_projection_has_no_field() {
        assert_eq!(LeaseError::EmptyProjection.field(), None);
    }
}
