//! Shared utilities for the aureus wallet core.

pub mod logging;

pub use logging::init_tracing;
