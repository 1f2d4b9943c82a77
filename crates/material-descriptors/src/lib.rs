//! Material Descriptors
//!
//! Typed records describing a candidate material: the numeric descriptor
//! record submitted for stability prediction and the categorical profile
//! used by the unified predictor.

mod descriptors;
mod ordering;
mod profile;

pub use descriptors::MaterialDescriptors;
pub use ordering::{MagneticOrdering, ParseOrderingError};
pub use profile::{
    CategoricalProfile, FieldGroup, Level, ParseLevelError, ProfileField, PROFILE_GROUPS,
};
