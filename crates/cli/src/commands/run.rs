// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `spawnkit run [options] -- <command> [args]` - run one command

use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Args;
use spawnkit_adapters::OutputSink;
use spawnkit_engine::{ProcessRunner, SpawnOptions, DEFAULT_MAX_RETRIES, DEFAULT_TIMEOUT};

use crate::exit_error::ExitError;
use crate::output::{print_result, OutputFormat};

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Kill the command after this many milliseconds (default: $SPAWNKIT_TIMEOUT_MS or 12000)
    #[arg(long = "timeout-ms", value_name = "MS")]
    pub timeout_ms: Option<u64>,

    /// Retries for transient launch failures (EBUSY, UNKNOWN)
    #[arg(long = "max-retries", value_name = "N", default_value_t = DEFAULT_MAX_RETRIES)]
    pub max_retries: u32,

    /// Working directory for the command
    #[arg(long, value_name = "DIR")]
    pub cwd: Option<PathBuf>,

    /// Set an environment variable (repeatable)
    #[arg(short = 'e', long = "env", value_name = "KEY=VALUE", value_parser = parse_env_pair)]
    pub env: Vec<(String, String)>,

    /// Remove an inherited environment variable (repeatable)
    #[arg(long = "unset", value_name = "KEY")]
    pub unset: Vec<String>,

    /// Echo output live instead of appending it to the log files
    #[arg(long)]
    pub stream: bool,

    /// Command to run
    pub command: String,

    /// Arguments for the command
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParseEnvError {
    #[error("invalid KEY=VALUE: no `=` found in `{0}`")]
    MissingEquals(String),
    #[error("invalid KEY=VALUE: empty key in `{0}`")]
    EmptyKey(String),
}

fn parse_env_pair(s: &str) -> Result<(String, String), ParseEnvError> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| ParseEnvError::MissingEquals(s.to_string()))?;
    if key.is_empty() {
        return Err(ParseEnvError::EmptyKey(s.to_string()));
    }
    Ok((key.to_string(), value.to_string()))
}

/// Translate flags into engine options. Flags win over the environment.
pub fn build_options(args: &RunArgs) -> SpawnOptions {
    let timeout = args
        .timeout_ms
        .map(std::time::Duration::from_millis)
        .or_else(crate::env::timeout_ms)
        .unwrap_or(DEFAULT_TIMEOUT);

    let mut options = SpawnOptions::new(args.command.as_str())
        .args(args.args.iter().cloned())
        .timeout(timeout)
        .max_retries(args.max_retries);

    if let Some(cwd) = &args.cwd {
        options = options.cwd(cwd.clone());
    }
    for (key, value) in &args.env {
        options = options.env(key.as_str(), value.as_str());
    }
    for key in &args.unset {
        options = options.env_remove(key.as_str());
    }
    if args.stream {
        options = options
            .on_stdout(echo(std::io::stdout))
            .on_stderr(echo(std::io::stderr));
    }
    options
}

fn echo<W, F>(stream: F) -> OutputSink
where
    W: Write,
    F: Fn() -> W + Send + Sync + 'static,
{
    Arc::new(move |text: &str| {
        let mut out = stream();
        if let Err(e) = out.write_all(text.as_bytes()).and_then(|()| out.flush()) {
            tracing::debug!(error = %e, "failed to echo output");
        }
    })
}

pub async fn handle(args: RunArgs, format: OutputFormat) -> Result<()> {
    let options = build_options(&args);
    tracing::debug!(?options, "running");

    let result = ProcessRunner::new().run(&options).await;
    print_result(&result, format)?;

    if !result.ok {
        return Err(ExitError::silent(1).into());
    }
    Ok(())
}

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;
