// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Traced adapter wrappers for consistent observability

use crate::launch::{LaunchSpec, Launched, Launcher};
use async_trait::async_trait;
use spawnkit_core::SpawnFailure;
use tracing::Instrument;

/// Wrapper that adds tracing to any Launcher
#[derive(Clone)]
pub struct TracedLauncher<L> {
    inner: L,
}

impl<L> TracedLauncher<L> {
    pub fn new(inner: L) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &L {
        &self.inner
    }
}

#[async_trait]
impl<L: Launcher> Launcher for TracedLauncher<L> {
    async fn launch(&self, spec: &LaunchSpec) -> Result<Launched, SpawnFailure> {
        let cwd = spec.cwd.as_ref().map(|p| p.display().to_string());
        async {
            tracing::debug!(args = ?spec.args, env_count = spec.env.len(), "starting");
            let start = std::time::Instant::now();
            let result = self.inner.launch(spec).await;
            let elapsed_ms = start.elapsed().as_millis() as u64;
            match &result {
                Ok(launched) => {
                    tracing::debug!(pid = ?launched.handle.pid(), elapsed_ms, "started")
                }
                Err(e) => {
                    tracing::debug!(code = %e.code, elapsed_ms, error = %e.message, "launch failed")
                }
            }
            result
        }
        .instrument(tracing::debug_span!(
            "process.launch",
            command = %spec.command,
            cwd = cwd.as_deref()
        ))
        .await
    }
}

#[cfg(test)]
#[path = "traced_tests.rs"]
mod tests;
