//! Utility modules
//!
//! Currently just the structured logging setup shared by the binary and the
//! integration tests.

pub mod logging;

// Re-export commonly used items
pub use logging::{init_from_env, init_logging, parse_level, LoggingConfig};
