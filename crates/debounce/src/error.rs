//! Error types for the debounce crate

use thiserror::Error;

/// Result type for debounce operations
pub type Result<T> = std::result::Result<T, DebounceError>;

/// Errors raised while configuring a debouncer or its scheduler
///
/// Calling a debounced function never fails. Panics from the wrapped
/// function surface wherever the timer fires.
#[derive(Debug, Error)]
pub enum DebounceError {
    /// Delay outside the accepted range
    #[error("invalid delay {delay_ms}ms (must be 0-{max_ms}ms)")]
    InvalidDelay { delay_ms: u64, max_ms: u64 },

    /// A tokio scheduler was requested outside of a runtime
    #[error("no tokio runtime available (construct the scheduler inside a runtime or pass a handle)")]
    NoRuntime,

    /// Malformed configuration file
    #[error("failed to parse configuration: {0}")]
    Config(#[from] toml::de::Error),

    /// Configuration could not be written out
    #[error("failed to serialize configuration: {0}")]
    Serialize(#[from] toml::ser::Error),
}
