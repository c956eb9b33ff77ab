//! Debouncing for arbitrary callables
//!
//! This crate provides:
//! - `Debouncer`: collapses bursts of calls into one delayed execution
//!   carrying the arguments of the last call
//! - `Scheduler`: the timer capability the debouncer is driven by
//! - A tokio-backed scheduler and a simulated-clock scheduler for tests
//! - TOML configuration with validation

pub mod config;
pub mod debouncer;
pub mod error;
pub mod scheduler;

// Re-exports
pub use config::DebounceConfig;
pub use debouncer::{debounce, DebounceState, Debouncer};
pub use error::{DebounceError, Result};
pub use scheduler::{ManualScheduler, Scheduler, TimerId, TokioScheduler};
