// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use clap::ValueEnum;
use spawnkit_core::SpawnResult;

#[derive(Clone, Copy, Debug, Default, PartialEq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// How the process ended, e.g. `exit 2`, `signal SIGTERM` or the launch error.
pub fn describe_end(result: &SpawnResult) -> String {
    if let Some(failure) = &result.spawn_error {
        return failure.to_string();
    }
    match (&result.signal_code, result.exit_code) {
        (Some(signal), _) => format!("signal {}", signal),
        (None, Some(code)) => format!("exit {}", code),
        (None, None) => "no exit status".to_string(),
    }
}

/// One-line text summary: `ok (exit 0, 12ms)` or `failed: <tag> (exit 2, 5ms)`.
pub fn format_summary(result: &SpawnResult) -> String {
    let detail = format!("{}, {}ms", describe_end(result), result.duration);
    match result.error_tag() {
        Some(tag) if !result.ok => format!("failed: {} ({})", tag, detail),
        _ => format!("ok ({})", detail),
    }
}

pub fn print_result(result: &SpawnResult, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => println!("{}", format_summary(result)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(result)?),
    }
    Ok(())
}

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;
