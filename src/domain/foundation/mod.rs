//! Foundation module - Shared domain primitives.
//!
//! Contains the error vocabulary and small helpers shared by the
//! request and document modules.

mod errors;

pub use errors::{is_filled, single_line, ValidationError};
