// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Process runner: launch, capture, deadline, settle, classify.
//!
//! Each attempt multiplexes four sources in one `select!` loop: a channel per
//! output stream (closure is end-of-stream), the child's exit, and the
//! deadline armed once the OS confirms the process started. Settlement
//! happens at most once per attempt.

use crate::options::SpawnOptions;
use crate::retry::{RetryPolicy, DEFAULT_BASE_DELAY};
use crate::session::Session;
use spawnkit_adapters::{
    GroupSignal, Launched, Launcher, OsLauncher, OutputSink, ProcessHandle, TracedLauncher,
};
use spawnkit_core::{Platform, SpawnResult};
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// How long to keep collecting in-flight output after settling.
pub const DEFAULT_DRAIN_GRACE: Duration = Duration::from_millis(100);

const READ_CHUNK: usize = 8 * 1024;

type Chunks = mpsc::UnboundedReceiver<Vec<u8>>;

/// Runs external commands and reports a classified [`SpawnResult`].
///
/// Holds no per-run state; concurrent `run` calls are independent.
pub struct ProcessRunner<L = TracedLauncher<OsLauncher>> {
    launcher: L,
    platform: Platform,
    retry_base_delay: Duration,
    drain_grace: Duration,
}

impl ProcessRunner {
    pub fn new() -> Self {
        Self::with_launcher(TracedLauncher::new(OsLauncher))
    }
}

impl Default for ProcessRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl<L: Launcher> ProcessRunner<L> {
    pub fn with_launcher(launcher: L) -> Self {
        Self {
            launcher,
            platform: Platform::current(),
            retry_base_delay: DEFAULT_BASE_DELAY,
            drain_grace: DEFAULT_DRAIN_GRACE,
        }
    }

    pub fn platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    pub fn retry_base_delay(mut self, delay: Duration) -> Self {
        self.retry_base_delay = delay;
        self
    }

    pub fn drain_grace(mut self, grace: Duration) -> Self {
        self.drain_grace = grace;
        self
    }

    pub fn launcher(&self) -> &L {
        &self.launcher
    }

    /// Run `options` to completion. Never fails: every outcome is in the result.
    ///
    /// Transient launch failures are retried with linear backoff up to
    /// `options.max_retries` times; the last attempt's result is returned.
    pub async fn run(&self, options: &SpawnOptions) -> SpawnResult {
        let policy = RetryPolicy::new(options.max_retries).with_base_delay(self.retry_base_delay);
        let mut attempt = 0;
        loop {
            let session = self.attempt(options).await;
            let backoff = session
                .spawn_failure()
                .and_then(|failure| policy.backoff(failure, attempt).map(|d| (failure, d)));
            if let Some((failure, delay)) = backoff {
                tracing::debug!(
                    command = %options.command,
                    attempt,
                    code = %failure.code,
                    delay_ms = delay.as_millis() as u64,
                    "retrying transient launch failure"
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
                continue;
            }
            return session.into_result(options.timeout, &self.platform);
        }
    }

    async fn attempt(&self, options: &SpawnOptions) -> Session {
        let mut session = Session::new();
        let Launched {
            mut handle,
            stdout,
            stderr,
        } = match self.launcher.launch(&options.launch_spec()).await {
            Ok(launched) => launched,
            Err(failure) => {
                session.launch_failed(failure);
                session.settle();
                return session;
            }
        };

        session.mark_started();
        let deadline = tokio::time::sleep(options.timeout);
        tokio::pin!(deadline);

        let (mut stdout_rx, stdout_task) = pump(stdout);
        let (mut stderr_rx, stderr_task) = pump(stderr);
        let mut stdout_open = true;
        let mut stderr_open = true;
        let mut exit_seen = false;

        loop {
            let settle_now = tokio::select! {
                chunk = stdout_rx.recv(), if stdout_open => match chunk {
                    Some(bytes) => {
                        session.stdout_chunk(&bytes, &options.on_stdout);
                        false
                    }
                    None => {
                        stdout_open = false;
                        session.stdout_ended()
                    }
                },
                chunk = stderr_rx.recv(), if stderr_open => match chunk {
                    Some(bytes) => {
                        session.stderr_chunk(&bytes, &options.on_stderr);
                        false
                    }
                    None => {
                        stderr_open = false;
                        false
                    }
                },
                status = handle.wait(), if !exit_seen => {
                    exit_seen = true;
                    let settle = match status {
                        Ok(status) => session.exited(status),
                        Err(e) => {
                            tracing::warn!(
                                command = %options.command,
                                error = %e,
                                "failed to wait on process"
                            );
                            session.exit_unknown()
                        }
                    };
                    self.reap_group(&mut handle);
                    settle
                },
                () = &mut deadline => {
                    tracing::debug!(
                        command = %options.command,
                        timeout_ms = options.timeout.as_millis() as u64,
                        "deadline reached"
                    );
                    true
                },
            };
            if settle_now {
                break;
            }
        }

        session.settle();
        if session.needs_force_kill() {
            stdout_task.abort();
            stderr_task.abort();
            if let Err(e) = handle.force_kill().await {
                tracing::warn!(
                    command = %options.command,
                    error = %e,
                    "failed to kill timed out process"
                );
            }
            collect_pending(&mut stdout_rx, &mut session, &options.on_stdout, Stream::Stdout);
            collect_pending(&mut stderr_rx, &mut session, &options.on_stderr, Stream::Stderr);
        } else {
            let streams = OpenStreams {
                stdout: stdout_open.then_some(&mut stdout_rx),
                stderr: stderr_open.then_some(&mut stderr_rx),
            };
            self.drain(streams, &mut session, options).await;
            stdout_task.abort();
            stderr_task.abort();
        }

        tracing::debug!(
            command = %options.command,
            exit_code = ?session.exit_code(),
            signal = ?session.signal(),
            "settled"
        );
        session
    }

    /// Signal the process group so children left behind are cleaned up.
    fn reap_group(&self, handle: &mut ProcessHandle) {
        if !self.platform.supports_process_groups() {
            return;
        }
        match handle.terminate_group() {
            Ok(GroupSignal::Sent) => {
                tracing::trace!(pid = ?handle.pid(), "signalled process group")
            }
            Ok(_) => {}
            Err(e) => tracing::warn!(error = %e, "failed to signal process group"),
        }
    }

    /// Collect output still in flight after settling, bounded by the drain grace.
    async fn drain(
        &self,
        mut streams: OpenStreams<'_>,
        session: &mut Session,
        options: &SpawnOptions,
    ) {
        let grace = tokio::time::sleep(self.drain_grace);
        tokio::pin!(grace);
        while streams.stdout.is_some() || streams.stderr.is_some() {
            tokio::select! {
                chunk = recv(&mut streams.stdout) => match chunk {
                    Some(bytes) => session.stdout_chunk(&bytes, &options.on_stdout),
                    None => streams.stdout = None,
                },
                chunk = recv(&mut streams.stderr) => match chunk {
                    Some(bytes) => session.stderr_chunk(&bytes, &options.on_stderr),
                    None => streams.stderr = None,
                },
                () = &mut grace => break,
            }
        }
    }
}

struct OpenStreams<'a> {
    stdout: Option<&'a mut Chunks>,
    stderr: Option<&'a mut Chunks>,
}

/// Receive from an open stream; a closed one never resolves.
async fn recv(stream: &mut Option<&mut Chunks>) -> Option<Vec<u8>> {
    match stream {
        Some(rx) => rx.recv().await,
        None => std::future::pending().await,
    }
}

#[derive(Clone, Copy)]
enum Stream {
    Stdout,
    Stderr,
}

/// Take chunks already received without waiting for more.
fn collect_pending(rx: &mut Chunks, session: &mut Session, sink: &OutputSink, stream: Stream) {
    while let Ok(bytes) = rx.try_recv() {
        match stream {
            Stream::Stdout => session.stdout_chunk(&bytes, sink),
            Stream::Stderr => session.stderr_chunk(&bytes, sink),
        }
    }
}

/// Forward a pipe into a channel, one message per read. The channel closes
/// at end-of-stream.
fn pump<R>(mut reader: R) -> (Chunks, JoinHandle<()>)
where
    R: AsyncRead + Unpin + Send + 'static,
{
    let (tx, rx) = mpsc::unbounded_channel();
    let task = tokio::spawn(async move {
        let mut buf = vec![0u8; READ_CHUNK];
        loop {
            match reader.read(&mut buf).await {
                Ok(0) => break,
                Ok(n) => {
                    if tx.send(buf[..n].to_vec()).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    tracing::debug!(error = %e, "output stream read failed");
                    break;
                }
            }
        }
    });
    (rx, task)
}

#[cfg(test)]
#[path = "runner_tests/mod.rs"]
mod tests;
