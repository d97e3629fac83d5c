//! High-level API wrappers for the matching service
//!
//! This module provides convenient wrappers around the raw HTTP client,
//! adding the request-shape checks the server relies on.

mod found;
mod lost;

pub use found::*;
pub use lost::*;
