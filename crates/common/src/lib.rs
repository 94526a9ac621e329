//! Common utilities for usb-inspector
//!
//! This crate provides functionality shared between the classifier and the
//! command-line front end: error handling, tracing setup, and fixtures for
//! building hardware trees in tests and benchmarks.

pub mod error;
pub mod logging;
pub mod test_utils;

pub use error::{Error, Result};
pub use logging::setup_logging;
