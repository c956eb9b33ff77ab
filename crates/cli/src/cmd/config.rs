//! Configuration inspection commands

use crate::system_config;
use anyhow::Result;
use debounce::config::MAX_DELAY_MS;
use owo_colors::OwoColorize;
use std::path::Path;

/// Print a commented example configuration
pub async fn run_example() -> Result<()> {
    print!("{}", system_config::example_config());
    Ok(())
}

/// Load a config file, validate it, and show the effective values
pub async fn run_check(path: &Path) -> Result<()> {
    let config = system_config::load_file(path)?;

    println!("{} {}", "✓".green(), path.display());
    println!(
        "  {} = {} {}",
        "delay_ms".cyan(),
        config.delay_ms,
        format!("({:?})", config.delay()).dimmed()
    );
    println!(
        "  {} = {}",
        "flush_on_close".cyan(),
        config.flush_on_close
    );

    println!("\n{}", "Valid Ranges:".bold());
    println!("  delay_ms: 0-{}", MAX_DELAY_MS);

    Ok(())
}
