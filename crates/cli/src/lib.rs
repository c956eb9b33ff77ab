//! dbnc - debounce a line stream
//!
//! Library half of the `dbnc` binary, split out so integration tests and
//! other tools can drive the commands directly.

pub mod cmd;
pub mod system_config;
