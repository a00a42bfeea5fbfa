//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (errors, blank checks)
//! - `request` - The contracting request collected from the user
//! - `document` - Generated document blocks, jurisdiction and markup outline

pub mod document;
pub mod foundation;
pub mod request;
