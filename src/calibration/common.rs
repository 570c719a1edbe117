//! Common utilities module
//!
//! This module contains the error type shared across readers, writers and the converter.

pub mod error;

pub use error::{ConversionError, Result};
