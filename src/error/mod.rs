//! Error types for rejected values.
//!
//! This module provides the path-carrying [`ValidationError`] and the
//! [`with_path`] wrapper used at every nesting boundary.

mod validation_error;

pub use validation_error::{with_path, ErrorKind, ValidationError};
