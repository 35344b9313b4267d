// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `spawnkit clean-logs` - delete the default log files

use anyhow::{Context, Result};
use spawnkit_adapters::LogFiles;

use crate::output::OutputFormat;

pub fn handle(format: OutputFormat) -> Result<()> {
    let logs = LogFiles::default_paths();
    remove(&logs, format)
}

fn remove(logs: &LogFiles, format: OutputFormat) -> Result<()> {
    logs.clean().context("failed to remove log files")?;
    tracing::debug!(
        stdout = %logs.stdout.display(),
        stderr = %logs.stderr.display(),
        "removed log files"
    );

    match format {
        OutputFormat::Text => {
            println!("Removed {}", logs.stdout.display());
            println!("Removed {}", logs.stderr.display());
        }
        OutputFormat::Json => {
            let obj = serde_json::json!({
                "removed": [logs.stdout, logs.stderr],
            });
            println!("{}", serde_json::to_string_pretty(&obj)?);
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "clean_logs_tests.rs"]
mod tests;
