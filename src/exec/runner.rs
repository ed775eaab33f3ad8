// src/exec/runner.rs

//! Single test-command invocation: spawn, capture, classify.

use std::path::Path;
use std::process::Stdio;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Command;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::exec::InvocationOutcome;

/// Runs the configured test command once per changed file.
///
/// The command template may contain a `{}` placeholder for the test
/// identifier (the changed file's base name); without one the identifier
/// is appended as the final argument. The external command's exit code and
/// output are the entire observable contract.
#[derive(Debug, Clone)]
pub struct TestRunner {
    command: String,
}

impl TestRunner {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }

    /// Run the test command for one changed file.
    ///
    /// An invocation fully completes (process exit, output drained) before
    /// its outcome is returned. Inability to launch the command is reported
    /// as a failure outcome rather than an error: a missing tool must not
    /// take the daemon down.
    pub async fn run(&self, file: &Path) -> InvocationOutcome {
        let test_id = test_identifier(file);
        let command_line = self.command_line(&test_id);

        info!(file = ?file, test = %test_id, "running test command");

        match run_command(&command_line).await {
            Ok((passed, output)) => {
                debug!(file = ?file, passed, "test command finished");
                InvocationOutcome {
                    file: file.to_path_buf(),
                    passed,
                    output,
                }
            }
            Err(err) => {
                warn!(file = ?file, error = %err, "test command could not be run");
                InvocationOutcome {
                    file: file.to_path_buf(),
                    passed: false,
                    output: format!("failed to run test command '{command_line}': {err:#}\n"),
                }
            }
        }
    }

    fn command_line(&self, test_id: &str) -> String {
        if self.command.contains("{}") {
            self.command.replace("{}", test_id)
        } else {
            format!("{} {}", self.command, test_id)
        }
    }
}

/// The name passed to the external test command: the file's base name,
/// without directory components. The command receives it as a filter, not
/// the full path.
fn test_identifier(file: &Path) -> String {
    file.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| file.to_string_lossy().into_owned())
}

/// Spawn the command through the platform shell, drain both streams into
/// per-invocation buffers, and classify the exit status.
async fn run_command(command_line: &str) -> Result<(bool, String)> {
    let mut cmd = if cfg!(windows) {
        let mut c = Command::new("cmd");
        c.arg("/C").arg(command_line);
        c
    } else {
        let mut c = Command::new("sh");
        c.arg("-c").arg(command_line);
        c
    };

    cmd.stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    let mut child = cmd
        .spawn()
        .with_context(|| format!("spawning '{command_line}'"))?;

    // Drain both streams concurrently so neither pipe can fill up and
    // block the child. Buffers grow as lines arrive; they are owned by
    // this invocation only.
    let stdout_task = capture_lines(child.stdout.take());
    let stderr_task = capture_lines(child.stderr.take());

    let status = child
        .wait()
        .await
        .with_context(|| format!("waiting for '{command_line}'"))?;

    let mut output = stdout_task.await.unwrap_or_default();
    output.push_str(&stderr_task.await.unwrap_or_default());

    Ok((status.success(), output))
}

fn capture_lines<R>(stream: Option<R>) -> JoinHandle<String>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let mut buffer = String::new();
        if let Some(stream) = stream {
            let mut lines = BufReader::new(stream).lines();
            while let Ok(Some(line)) = lines.next_line().await {
                buffer.push_str(&line);
                buffer.push('\n');
            }
        }
        buffer
    })
}
