// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! spawnkit - run a command with a deadline and classify how it ended

mod commands;
mod env;
mod exit_error;
mod output;

use output::OutputFormat;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{clean_logs, run};

#[derive(Parser)]
#[command(
    name = "spawnkit",
    version,
    about = "Run a command with a deadline and report how it ended"
)]
struct Cli {
    /// Output format
    #[arg(
        short = 'o',
        long = "output",
        value_enum,
        default_value_t,
        global = true
    )]
    output: OutputFormat,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a command and report the classified result
    Run(run::RunArgs),
    /// Delete the default stdout/stderr log files
    CleanLogs,
}

#[tokio::main]
async fn main() {
    setup_logging();
    if let Err(e) = run().await {
        let code = e
            .downcast_ref::<exit_error::ExitError>()
            .map_or(1, |c| c.code);
        let msg = format_error(&e);
        if !msg.is_empty() {
            eprintln!("Error: {}", msg);
        }
        std::process::exit(code);
    }
}

/// Diagnostics go to stderr so stdout stays parseable in `-o json` mode.
fn setup_logging() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let directives = env::log_filter().unwrap_or_else(|| "warn".to_string());
    let filter = EnvFilter::try_new(&directives).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Format an anyhow error, deduplicating the chain.
///
/// If every source message already appears in the top-level Display, the
/// "Caused by" chain is skipped.
fn format_error(err: &anyhow::Error) -> String {
    let top = err.to_string();

    let chain_redundant = err
        .chain()
        .skip(1)
        .all(|cause| top.contains(&cause.to_string()));

    if chain_redundant {
        return top;
    }

    let mut buf = top;
    for (i, cause) in err.chain().skip(1).enumerate() {
        buf.push_str(&format!("\n\nCaused by:\n    {}: {}", i, cause));
    }
    buf
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    let format = cli.output;

    let Some(command) = cli.command else {
        use clap::CommandFactory;
        Cli::command().print_help()?;
        println!();
        return Ok(());
    };

    match command {
        Commands::Run(args) => run::handle(args, format).await,
        Commands::CleanLogs => clean_logs::handle(format),
    }
}

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;
