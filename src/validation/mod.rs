//! Invariant checks over normalization results.

mod validate;

pub use validate::{validate_results, validate_sheet, ValidationResult};
