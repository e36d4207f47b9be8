//! External "explain this file" helper.
//!
//! The helper is an arbitrary program (by default a node script calling a
//! language model). It is run on a worker thread so the event loop never
//! blocks: the request goes out as JSON on the child's stdin, the explanation
//! comes back on stdout, and the outcome is delivered over a channel that the
//! event loop polls. Every request is bounded by a timeout and can be
//! cancelled, which kills the child.

use serde::Serialize;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

use crate::core::error::{EditorError, Result};
use crate::core::id::BufferId;

/// How often the worker checks the child for exit, timeout and cancellation
const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Default bound on a single explain request
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// How to launch the helper: `program args... <file-path>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelperConfig {
    pub program: String,
    pub args: Vec<String>,
    pub timeout: Duration,
}

impl Default for HelperConfig {
    fn default() -> Self {
        Self {
            program: "node".to_string(),
            args: Vec::new(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Request body written to the helper's stdin
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ExplainRequest<'a> {
    file_content: &'a str,
    file_path: &'a str,
}

/// A running explain request for one buffer
pub struct HelperTask {
    buffer_id: BufferId,
    rx: Receiver<Result<String>>,
    cancel: Arc<AtomicBool>,
    worker: Option<JoinHandle<()>>,
}

impl HelperTask {
    /// Start the helper for `content` of the file at `path`
    pub fn spawn(config: &HelperConfig, buffer_id: BufferId, content: String, path: PathBuf) -> Self {
        let (tx, rx) = mpsc::channel();
        let cancel = Arc::new(AtomicBool::new(false));
        let worker_cancel = Arc::clone(&cancel);
        let config = config.clone();

        debug!(%buffer_id, program = %config.program, "starting explain helper");
        let worker = thread::spawn(move || {
            let outcome = run_helper(&config, &content, &path, &worker_cancel);
            if let Err(e) = &outcome {
                warn!(%buffer_id, error = %e, "explain helper failed");
            }
            // The receiver is gone if the task was dropped; nothing to report then
            let _ = tx.send(outcome);
        });

        Self {
            buffer_id,
            rx,
            cancel,
            worker: Some(worker),
        }
    }

    pub fn buffer_id(&self) -> BufferId {
        self.buffer_id
    }

    /// Non-blocking check for the outcome
    pub fn try_result(&mut self) -> Option<Result<String>> {
        match self.rx.try_recv() {
            Ok(outcome) => {
                self.reap();
                Some(outcome)
            }
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                self.reap();
                Some(Err(EditorError::HelperUnavailable(
                    "helper worker exited without a result".to_string(),
                )))
            }
        }
    }

    /// Block up to `limit` for the outcome
    pub fn wait(&mut self, limit: Duration) -> Option<Result<String>> {
        match self.rx.recv_timeout(limit) {
            Ok(outcome) => {
                self.reap();
                Some(outcome)
            }
            Err(RecvTimeoutError::Timeout) => None,
            Err(RecvTimeoutError::Disconnected) => {
                self.reap();
                Some(Err(EditorError::HelperUnavailable(
                    "helper worker exited without a result".to_string(),
                )))
            }
        }
    }

    /// Ask the worker to kill the child and give up
    pub fn cancel(&self) {
        self.cancel.store(true, Ordering::Relaxed);
    }

    fn reap(&mut self) {
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

impl Drop for HelperTask {
    fn drop(&mut self) {
        self.cancel();
    }
}

fn unavailable(msg: impl Into<String>) -> EditorError {
    EditorError::HelperUnavailable(msg.into())
}

fn run_helper(config: &HelperConfig, content: &str, path: &Path, cancel: &AtomicBool) -> Result<String> {
    let path_str = path.to_string_lossy();
    let request = serde_json::to_vec(&ExplainRequest {
        file_content: content,
        file_path: &path_str,
    })
    .map_err(|e| unavailable(format!("cannot encode request: {}", e)))?;

    let mut command = Command::new(&config.program);
    command
        .args(&config.args)
        .arg(path)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    // own process group, so a kill also reaches anything the helper started
    #[cfg(unix)]
    std::os::unix::process::CommandExt::process_group(&mut command, 0);
    let mut child = command
        .spawn()
        .map_err(|e| unavailable(format!("cannot start '{}': {}", config.program, e)))?;

    if let Some(mut stdin) = child.stdin.take() {
        // A helper that ignores stdin closes the pipe early; that is fine
        thread::spawn(move || {
            let _ = stdin.write_all(&request);
        });
    }
    let (output_tx, output_rx) = mpsc::channel();
    spawn_reader(Stream::Stdout, child.stdout.take(), output_tx.clone());
    spawn_reader(Stream::Stderr, child.stderr.take(), output_tx);

    let deadline = Instant::now() + config.timeout;
    let timed_out = || unavailable(format!("timed out after {} ms", config.timeout.as_millis()));
    let status = loop {
        if cancel.load(Ordering::Relaxed) {
            kill(&mut child);
            return Err(unavailable("request cancelled"));
        }
        match child.try_wait() {
            Ok(Some(status)) => break status,
            Ok(None) => {}
            Err(e) => {
                kill(&mut child);
                return Err(unavailable(format!("cannot wait for helper: {}", e)));
            }
        }
        if Instant::now() >= deadline {
            kill(&mut child);
            return Err(timed_out());
        }
        thread::sleep(POLL_INTERVAL);
    };

    // The pipes stay open while anything the helper left behind holds them
    let (mut out, mut err) = (None, None);
    while out.is_none() || err.is_none() {
        if cancel.load(Ordering::Relaxed) {
            kill_group(&child);
            return Err(unavailable("request cancelled"));
        }
        let remaining = deadline.saturating_duration_since(Instant::now());
        if remaining.is_zero() {
            kill_group(&child);
            return Err(timed_out());
        }
        match output_rx.recv_timeout(remaining.min(POLL_INTERVAL)) {
            Ok((Stream::Stdout, text)) => out = Some(text),
            Ok((Stream::Stderr, text)) => err = Some(text),
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }
    let out = out.unwrap_or_default();
    let err = err.unwrap_or_default();

    if !status.success() {
        let detail = err.trim();
        return Err(unavailable(if detail.is_empty() {
            format!("helper exited with {}", status)
        } else {
            format!("helper exited with {}: {}", status, detail)
        }));
    }

    let text = out.trim();
    if text.is_empty() {
        return Err(unavailable("helper produced no output"));
    }
    Ok(text.to_string())
}

#[derive(Debug, Clone, Copy)]
enum Stream {
    Stdout,
    Stderr,
}

fn spawn_reader<R: Read + Send + 'static>(stream: Stream, pipe: Option<R>, tx: Sender<(Stream, String)>) {
    thread::spawn(move || {
        let mut bytes = Vec::new();
        if let Some(mut pipe) = pipe {
            let _ = pipe.read_to_end(&mut bytes);
        }
        // nobody is listening once the request timed out
        let _ = tx.send((stream, String::from_utf8_lossy(&bytes).into_owned()));
    });
}

fn kill(child: &mut Child) {
    kill_group(child);
    let _ = child.kill();
    let _ = child.wait();
}

/// Kill the helper's whole process group
#[cfg(unix)]
fn kill_group(child: &Child) {
    let group = format!("-{}", child.id());
    let killed = Command::new("kill")
        .args(["-KILL", "--", &group])
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status();
    if let Err(e) = killed {
        debug!(error = %e, "could not kill helper process group");
    }
}

#[cfg(not(unix))]
fn kill_group(_child: &Child) {}
