// src/engine/runtime.rs

use std::fmt;
use std::time::Duration;

use tokio::sync::watch;
use tracing::{debug, info};

use crate::engine::DaemonOptions;
use crate::errors::Result;
use crate::exec::InvocationBackend;
use crate::sink::{fan_out, ResultSink};
use crate::watch::ChangeDetector;

/// Drives the poll → check → invoke → notify cycle until shutdown.
///
/// The loop is fixed-interval: a check that takes longer than the interval
/// simply delays the next sleep, cycles never overlap. Invocations within
/// one change batch run sequentially; each outcome is fanned out before the
/// next file's command starts.
pub struct Daemon<B: InvocationBackend> {
    detector: ChangeDetector,
    backend: B,
    sinks: Vec<Box<dyn ResultSink>>,
    interval: Duration,
    options: DaemonOptions,
}

impl<B: InvocationBackend> fmt::Debug for Daemon<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Daemon")
            .field("detector", &self.detector)
            .field("interval", &self.interval)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl<B: InvocationBackend> Daemon<B> {
    pub fn new(
        detector: ChangeDetector,
        backend: B,
        sinks: Vec<Box<dyn ResultSink>>,
        interval: Duration,
        options: DaemonOptions,
    ) -> Self {
        Self {
            detector,
            backend,
            sinks,
            interval,
            options,
        }
    }

    /// Main loop.
    ///
    /// `shutdown_rx` flips to `true` when the process should stop (Ctrl-C).
    /// The sleep is preempted immediately; an in-flight invocation is
    /// allowed to finish and its outcome is still delivered, then the loop
    /// exits.
    pub async fn run(mut self, mut shutdown_rx: watch::Receiver<bool>) -> Result<()> {
        info!(
            root = ?self.detector.root(),
            interval_seconds = self.interval.as_secs(),
            "autotest daemon started; press Ctrl+C to stop"
        );

        // The first walk establishes the baseline without reporting every
        // existing file as changed.
        self.detector.start();

        loop {
            if self.options.once {
                debug!("once mode: skipping sleep");
            } else {
                tokio::select! {
                    _ = tokio::time::sleep(self.interval) => {}
                    _ = shutdown_rx.changed() => {
                        info!("shutdown requested; stopping daemon");
                        break;
                    }
                }
            }

            if let Some(batch) = self.detector.check() {
                info!(
                    files = batch.files.len(),
                    root = ?batch.root,
                    "change batch detected"
                );

                for file in batch.files {
                    let outcome = self.backend.invoke(file).await;
                    fan_out(&mut self.sinks, &outcome);

                    if *shutdown_rx.borrow() {
                        info!("shutdown requested; current invocation finished, stopping daemon");
                        return Ok(());
                    }
                }
            }

            if self.options.once {
                debug!("once mode: single check cycle done");
                break;
            }
        }

        info!("daemon exiting");
        Ok(())
    }
}
