//! Descriptor Validation
//!
//! Validates descriptor submissions as typed by a user, reports per-field
//! errors and extreme-value warnings, and parses valid submissions into
//! [`material_descriptors::MaterialDescriptors`].

mod error;
mod form;
mod validator;

pub use error::ValidationError;
pub use form::{DescriptorForm, FormText};
pub use validator::{ExtremeWarning, Validated, ValidationConfig, ValidationReport, Validator};
