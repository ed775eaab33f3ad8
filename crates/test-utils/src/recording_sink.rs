use std::sync::{Arc, Mutex};

use anyhow::Result;
use autotest::exec::InvocationOutcome;
use autotest::sink::ResultSink;

/// Sink that records every outcome it receives, for assertions.
pub struct RecordingSink {
    seen: Arc<Mutex<Vec<InvocationOutcome>>>,
}

impl RecordingSink {
    pub fn new(seen: Arc<Mutex<Vec<InvocationOutcome>>>) -> Self {
        Self { seen }
    }
}

impl ResultSink for RecordingSink {
    fn name(&self) -> &str {
        "recording"
    }

    fn notify(&mut self, outcome: &InvocationOutcome) -> Result<()> {
        self.seen.lock().unwrap().push(outcome.clone());
        Ok(())
    }
}
