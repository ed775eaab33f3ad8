// src/sink/mod.rs

//! Result-sink fan-out.
//!
//! Every invocation outcome is delivered to every registered sink. The
//! logging sink is always present, independent of configuration, so
//! results are never silently lost. Additional sinks are resolved from a
//! built-in registry by name; unknown names and construction failures are
//! warnings, not fatal errors.

pub mod builtin;

pub use builtin::{FileSink, LogSink, StdoutSink};

use anyhow::Result;
use tracing::warn;

use crate::config::model::SinkSection;
use crate::exec::InvocationOutcome;

/// A result-reporting destination.
pub trait ResultSink: Send {
    /// Registry name, used in logs when a sink misbehaves.
    fn name(&self) -> &str;

    /// Receive one invocation outcome.
    fn notify(&mut self, outcome: &InvocationOutcome) -> Result<()>;
}

/// Deliver one outcome to every sink.
///
/// A failing sink must not prevent delivery to the remaining sinks: the
/// failure is logged and the fan-out continues.
pub fn fan_out(sinks: &mut [Box<dyn ResultSink>], outcome: &InvocationOutcome) {
    for sink in sinks.iter_mut() {
        if let Err(err) = sink.notify(outcome) {
            warn!(sink = sink.name(), error = %err, "result sink failed; continuing fan-out");
        }
    }
}

/// Resolve the configured sink names into concrete sinks.
///
/// The logging sink comes first and is always registered. A name that is
/// unknown, or whose sink fails to construct, is skipped with a warning.
pub fn build_sinks(cfg: &SinkSection) -> Vec<Box<dyn ResultSink>> {
    let mut sinks: Vec<Box<dyn ResultSink>> = vec![Box::new(LogSink)];

    for name in &cfg.sinks {
        match construct_sink(name, cfg) {
            Ok(Some(sink)) => sinks.push(sink),
            Ok(None) => {
                warn!(sink = %name, "unknown result sink name; skipping");
            }
            Err(err) => {
                warn!(sink = %name, error = %err, "could not construct result sink; skipping");
            }
        }
    }

    sinks
}

fn construct_sink(name: &str, cfg: &SinkSection) -> Result<Option<Box<dyn ResultSink>>> {
    match name {
        "log" => Ok(Some(Box::new(LogSink))),
        "stdout" => Ok(Some(Box::new(StdoutSink))),
        "file" => Ok(Some(Box::new(FileSink::open(&cfg.file_path)?))),
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use std::path::PathBuf;
    use std::sync::{Arc, Mutex};

    struct FailingSink;

    impl ResultSink for FailingSink {
        fn name(&self) -> &str {
            "failing"
        }

        fn notify(&mut self, _outcome: &InvocationOutcome) -> Result<()> {
            Err(anyhow!("sink exploded"))
        }
    }

    struct RecordingSink {
        seen: Arc<Mutex<Vec<PathBuf>>>,
    }

    impl ResultSink for RecordingSink {
        fn name(&self) -> &str {
            "recording"
        }

        fn notify(&mut self, outcome: &InvocationOutcome) -> Result<()> {
            self.seen.lock().unwrap().push(outcome.file.clone());
            Ok(())
        }
    }

    fn outcome() -> InvocationOutcome {
        InvocationOutcome {
            file: PathBuf::from("FooTest.java"),
            passed: true,
            output: String::new(),
        }
    }

    #[test]
    fn failing_sink_does_not_stop_fan_out() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut sinks: Vec<Box<dyn ResultSink>> = vec![
            Box::new(FailingSink),
            Box::new(RecordingSink {
                seen: Arc::clone(&seen),
            }),
        ];

        fan_out(&mut sinks, &outcome());

        assert_eq!(seen.lock().unwrap().len(), 1);
    }

    #[test]
    fn log_sink_is_always_first() {
        let sinks = build_sinks(&SinkSection::default());
        assert_eq!(sinks.len(), 1);
        assert_eq!(sinks[0].name(), "log");
    }

    #[test]
    fn unknown_sink_names_are_skipped() {
        let cfg = SinkSection {
            sinks: vec!["stdout".to_string(), "growl".to_string()],
            ..SinkSection::default()
        };
        let sinks = build_sinks(&cfg);
        let names: Vec<&str> = sinks.iter().map(|s| s.name()).collect();
        assert_eq!(names, vec!["log", "stdout"]);
    }
}
