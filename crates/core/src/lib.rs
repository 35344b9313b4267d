// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! spawnkit-core: result types and failure classification for subprocess runs

pub mod classify;
pub mod failure;
pub mod platform;
pub mod result;

pub use classify::{classify, Classification, TerminalState};
pub use failure::{Failure, SpawnFailure, TRANSIENT_SPAWN_CODES};
pub use platform::Platform;
pub use result::{epoch_ms, SpawnResult};
