//! Route Handlers

pub mod analyze;
pub mod predict;
pub mod suggestions;
pub mod validate;
