// src/sink/builtin.rs

//! Built-in result sinks.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{error, info};

use crate::exec::InvocationOutcome;
use crate::sink::ResultSink;

/// The always-present sink: reports outcomes through the daemon's own log.
pub struct LogSink;

impl ResultSink for LogSink {
    fn name(&self) -> &str {
        "log"
    }

    fn notify(&mut self, outcome: &InvocationOutcome) -> Result<()> {
        if outcome.passed {
            info!(file = %outcome.file.display(), "tests passed");
        } else {
            error!(
                file = %outcome.file.display(),
                "tests failed\n{}",
                outcome.output
            );
        }
        Ok(())
    }
}

/// Prints a one-line verdict per outcome to stdout; failures include the
/// captured command output.
pub struct StdoutSink;

impl ResultSink for StdoutSink {
    fn name(&self) -> &str {
        "stdout"
    }

    fn notify(&mut self, outcome: &InvocationOutcome) -> Result<()> {
        let verdict = if outcome.passed { "PASS" } else { "FAIL" };
        println!("[{verdict}] {}", outcome.file.display());
        if !outcome.passed && !outcome.output.is_empty() {
            print!("{}", outcome.output);
        }
        Ok(())
    }
}

/// Appends verdicts to a results file.
pub struct FileSink {
    file: File,
}

impl FileSink {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("opening results file {:?}", path))?;
        Ok(Self { file })
    }
}

impl ResultSink for FileSink {
    fn name(&self) -> &str {
        "file"
    }

    fn notify(&mut self, outcome: &InvocationOutcome) -> Result<()> {
        let verdict = if outcome.passed { "PASS" } else { "FAIL" };
        writeln!(self.file, "[{verdict}] {}", outcome.file.display())
            .context("writing to results file")?;
        if !outcome.passed && !outcome.output.is_empty() {
            write!(self.file, "{}", outcome.output).context("writing to results file")?;
        }
        self.file.flush().context("flushing results file")?;
        Ok(())
    }
}
