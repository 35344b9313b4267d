// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Runner tests

mod failures;
mod lifecycle;
mod retry;
mod timeout;

use super::*;
use parking_lot::Mutex;
use spawnkit_adapters::FakeLauncher;
use std::sync::Arc;

/// Captures every chunk passed to a sink.
#[derive(Clone, Default)]
struct Recorder {
    chunks: Arc<Mutex<Vec<String>>>,
}

impl Recorder {
    fn sink(&self) -> OutputSink {
        let chunks = Arc::clone(&self.chunks);
        Arc::new(move |text: &str| chunks.lock().push(text.to_string()))
    }

    fn joined(&self) -> String {
        self.chunks.lock().concat()
    }
}

/// `sh -c <script>` with output kept out of the shared log files.
fn sh(script: &str) -> SpawnOptions {
    SpawnOptions::new("sh").args(["-c", script]).discard_output()
}

fn runner() -> ProcessRunner {
    ProcessRunner::new()
}

fn fake_runner() -> ProcessRunner<FakeLauncher> {
    ProcessRunner::with_launcher(FakeLauncher::new()).retry_base_delay(Duration::from_millis(10))
}
