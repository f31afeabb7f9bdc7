//! Shared plumbing for RH service binaries.

pub mod logging;

pub use logging::{init_logging, LogFormat};
