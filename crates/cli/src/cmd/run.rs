//! Debounce stdin to stdout
//!
//! Every input line supersedes the previous one; a line is written out
//! only once input has been quiet for the configured delay.

use crate::system_config;
use anyhow::{Context, Result};
use debounce::{debounce, DebounceConfig, TokioScheduler};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Options for `dbnc run`
#[derive(Debug, Default, Clone)]
pub struct RunOptions {
    /// Overrides `delay_ms` from the config file
    pub delay_ms: Option<u64>,
    /// Config file path
    pub config: Option<PathBuf>,
    /// Drop the pending line at end of input instead of emitting it
    pub no_flush: bool,
}

impl RunOptions {
    /// Merge command-line overrides into the loaded configuration
    pub fn resolve(&self) -> Result<DebounceConfig> {
        let mut config = system_config::load(self.config.as_deref())?;

        if let Some(delay_ms) = self.delay_ms {
            config.delay_ms = delay_ms;
        }
        if self.no_flush {
            config.flush_on_close = false;
        }

        config.validate().context("Invalid configuration value")?;
        Ok(config)
    }
}

pub async fn run(options: RunOptions) -> Result<()> {
    let config = options.resolve()?;
    info!(delay_ms = config.delay_ms, flush_on_close = config.flush_on_close, "Debouncing stdin");

    let stdin = BufReader::new(tokio::io::stdin());
    let stdout = tokio::io::stdout();
    let emitted = debounce_lines(stdin, stdout, &config).await?;

    debug!(emitted, "Input closed");
    Ok(())
}

/// Copy lines from `reader` to `writer`, debounced
///
/// Returns the number of lines written.
pub async fn debounce_lines<R, W>(reader: R, mut writer: W, config: &DebounceConfig) -> Result<usize>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let (tx, mut rx) = mpsc::unbounded_channel::<String>();
    let scheduler = Arc::new(TokioScheduler::new()?);
    let debouncer = debounce(
        move |line: String| {
            // The receiver outlives every debouncer handle.
            let _ = tx.send(line);
        },
        config.delay(),
        scheduler,
    );

    let mut lines = reader.lines();
    let mut emitted = 0;

    loop {
        tokio::select! {
            line = lines.next_line() => {
                match line.context("Failed to read input")? {
                    Some(line) => debouncer.call(line),
                    None => break,
                }
            }
            Some(line) = rx.recv() => {
                write_line(&mut writer, &line).await?;
                emitted += 1;
            }
        }
    }

    if config.flush_on_close {
        debouncer.flush();
    } else if debouncer.cancel() {
        warn!("Input ended with a pending line; dropping it");
    }

    // Dropping the last handle drops the sender, which ends the drain below.
    drop(debouncer);
    while let Some(line) = rx.recv().await {
        write_line(&mut writer, &line).await?;
        emitted += 1;
    }

    writer.flush().await.context("Failed to flush output")?;
    Ok(emitted)
}

async fn write_line<W: AsyncWrite + Unpin>(writer: &mut W, line: &str) -> Result<()> {
    writer
        .write_all(line.as_bytes())
        .await
        .context("Failed to write output")?;
    writer.write_all(b"\n").await.context("Failed to write output")?;
    // Each emission is user-visible on its own.
    writer.flush().await.context("Failed to flush output")?;
    Ok(())
}
