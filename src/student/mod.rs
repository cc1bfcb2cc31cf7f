//! Student entity module.
//!
//! This module handles:
//! - The stored student record
//! - The optional-field patch accepted by create and update
//! - Type coercion of loosely typed JSON input

pub mod coerce;
pub mod types;

pub use types::{Student, StudentPatch};
