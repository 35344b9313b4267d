// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

/// Carries a process exit code through `anyhow`; an empty message prints nothing.
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct ExitError {
    pub code: i32,
    pub message: String,
}

impl ExitError {
    /// Exit with `code` without printing an error line.
    pub fn silent(code: i32) -> Self {
        Self {
            code,
            message: String::new(),
        }
    }
}
