// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake launcher for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{LaunchSpec, Launched, Launcher, OsLauncher};
use async_trait::async_trait;
use parking_lot::Mutex;
use spawnkit_core::SpawnFailure;
use std::collections::VecDeque;
use std::sync::Arc;

/// Recorded launch attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchCall {
    pub command: String,
    pub args: Vec<String>,
}

#[derive(Default)]
struct FakeLauncherState {
    calls: Vec<LaunchCall>,
    failures: VecDeque<SpawnFailure>,
}

/// Records every launch and fails the next scripted number of them.
///
/// Once the scripted failures are used up, launches go to a real
/// [`OsLauncher`].
#[derive(Clone, Default)]
pub struct FakeLauncher {
    inner: Arc<Mutex<FakeLauncherState>>,
    os: OsLauncher,
}

impl FakeLauncher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail the next launch with `failure`. Queues in call order.
    pub fn fail_next(&self, failure: SpawnFailure) -> &Self {
        self.inner.lock().failures.push_back(failure);
        self
    }

    /// Get all recorded launches
    pub fn calls(&self) -> Vec<LaunchCall> {
        self.inner.lock().calls.clone()
    }
}

#[async_trait]
impl Launcher for FakeLauncher {
    async fn launch(&self, spec: &LaunchSpec) -> Result<Launched, SpawnFailure> {
        let scripted = {
            let mut state = self.inner.lock();
            state.calls.push(LaunchCall {
                command: spec.command.clone(),
                args: spec.args.clone(),
            });
            state.failures.pop_front()
        };
        match scripted {
            Some(failure) => Err(failure),
            None => self.os.launch(spec).await,
        }
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
