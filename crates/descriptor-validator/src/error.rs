//! Validation Error Types

use thiserror::Error;

/// Errors during descriptor validation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// Value is empty or not a finite number
    #[error("Must be numeric (can be negative). Reason: {reason}")]
    NotNumeric {
        field: &'static str,
        reason: &'static str,
    },

    /// Value must be strictly positive
    #[error("Must be > 0. Reason: {reason}")]
    NotPositive {
        field: &'static str,
        reason: &'static str,
    },

    /// Value must be zero or positive
    #[error("Must be ≥ 0. Reason: {reason}")]
    Negative {
        field: &'static str,
        reason: &'static str,
    },

    /// Value must be a whole number, zero or positive
    #[error("Must be integer ≥ 0. Reason: {reason}")]
    NotCount {
        field: &'static str,
        reason: &'static str,
    },

    /// Missing required field
    #[error("Required. Reason: {reason}")]
    Required {
        field: &'static str,
        reason: &'static str,
    },

    /// Magnetic species list contains tokens that are not element symbols
    #[error("Use comma-separated element symbols (e.g., Fe, Co, Ni)")]
    InvalidElementSymbols { invalid: Vec<String> },

    /// Ordering outside the allowed set
    #[error("Invalid selection. Choose a valid ordering")]
    InvalidOrdering { value: String },

    /// Element counts are not a JSON object of numbers
    #[error("Must be valid JSON object. Reason: backend requires parseable element counts")]
    InvalidElements { detail: String },

    /// Profile key not in the feature catalogue
    #[error("Unknown profile feature: {key}")]
    UnknownProfileField { key: String },

    /// Profile value not among the feature's options
    #[error("Invalid selection {value:?}. Choose one of: {allowed}")]
    InvalidProfileOption {
        key: String,
        value: String,
        allowed: String,
    },
}

impl ValidationError {
    /// Name of the field the error refers to
    pub fn field(&self) -> &str {
        match self {
            ValidationError::NotNumeric { field, .. }
            | ValidationError::NotPositive { field, .. }
            | ValidationError::Negative { field, .. }
            | ValidationError::NotCount { field, .. }
            | ValidationError::Required { field, .. } => field,
            ValidationError::InvalidElementSymbols { .. } => "types_of_magnetic_species",
            ValidationError::InvalidOrdering { .. } => "ordering",
            ValidationError::InvalidElements { .. } => "elements",
            ValidationError::UnknownProfileField { key }
            | ValidationError::InvalidProfileOption { key, .. } => key,
        }
    }
}
