//! Shared utilities for govtally.

pub mod logging;

pub use logging::{init_logging, LogFormat};
