// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::time::Duration;

use clap::Parser;
use serial_test::serial;
use yare::parameterized;

use super::*;

#[derive(Parser)]
struct TestCli {
    #[command(flatten)]
    run: RunArgs,
}

fn parse(argv: &[&str]) -> RunArgs {
    let mut full = vec!["run"];
    full.extend_from_slice(argv);
    TestCli::try_parse_from(full).unwrap().run
}

#[test]
fn command_and_args_after_separator() {
    let args = parse(&["--", "sh", "-c", "echo hi"]);
    assert_eq!(args.command, "sh");
    assert_eq!(args.args, vec!["-c", "echo hi"]);
}

#[test]
fn hyphenated_args_without_separator() {
    let args = parse(&["--stream", "cargo", "test", "--quiet"]);
    assert!(args.stream);
    assert_eq!(args.command, "cargo");
    assert_eq!(args.args, vec!["test", "--quiet"]);
}

#[test]
fn command_is_required() {
    assert!(TestCli::try_parse_from(["run", "--stream"]).is_err());
}

#[parameterized(
    simple = { "KEY=value", Ok(("KEY".to_string(), "value".to_string())) },
    empty_value = { "KEY=", Ok(("KEY".to_string(), String::new())) },
    equals_in_value = { "URL=a=b", Ok(("URL".to_string(), "a=b".to_string())) },
    missing_equals = { "KEY", Err(ParseEnvError::MissingEquals("KEY".into())) },
    empty_key = { "=value", Err(ParseEnvError::EmptyKey("=value".into())) },
)]
fn env_pairs(input: &str, expected: Result<(String, String), ParseEnvError>) {
    assert_eq!(parse_env_pair(input), expected);
}

#[test]
#[serial]
fn options_from_flags() {
    let args = parse(&[
        "--timeout-ms",
        "250",
        "--max-retries",
        "3",
        "--cwd",
        "/tmp",
        "-e",
        "A=1",
        "--unset",
        "B",
        "--",
        "make",
        "all",
    ]);

    let options = build_options(&args);
    assert_eq!(options.command, "make");
    assert_eq!(options.args, vec!["all"]);
    assert_eq!(options.timeout, Duration::from_millis(250));
    assert_eq!(options.max_retries, 3);
    assert_eq!(options.cwd, Some(PathBuf::from("/tmp")));
    assert_eq!(
        options.env,
        vec![("A".to_string(), Some("1".to_string())), ("B".to_string(), None)]
    );
}

#[test]
#[serial]
fn timeout_falls_back_to_env_then_default() {
    std::env::remove_var("SPAWNKIT_TIMEOUT_MS");
    let args = parse(&["--", "true"]);
    assert_eq!(build_options(&args).timeout, DEFAULT_TIMEOUT);
    assert_eq!(build_options(&args).max_retries, DEFAULT_MAX_RETRIES);

    std::env::set_var("SPAWNKIT_TIMEOUT_MS", "900");
    assert_eq!(build_options(&args).timeout, Duration::from_millis(900));

    let flagged = parse(&["--timeout-ms", "50", "--", "true"]);
    assert_eq!(build_options(&flagged).timeout, Duration::from_millis(50));
    std::env::remove_var("SPAWNKIT_TIMEOUT_MS");
}
