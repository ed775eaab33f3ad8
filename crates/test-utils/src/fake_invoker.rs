use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use autotest::exec::{InvocationBackend, InvocationOutcome};

/// A fake invocation backend that:
/// - records which files were "invoked"
/// - returns a scripted pass/fail outcome without spawning a process.
pub struct FakeInvoker {
    invoked: Arc<Mutex<Vec<PathBuf>>>,
    pass: bool,
}

impl FakeInvoker {
    pub fn new(invoked: Arc<Mutex<Vec<PathBuf>>>) -> Self {
        Self {
            invoked,
            pass: true,
        }
    }

    /// Make every scripted outcome a failure.
    pub fn failing(invoked: Arc<Mutex<Vec<PathBuf>>>) -> Self {
        Self {
            invoked,
            pass: false,
        }
    }
}

impl InvocationBackend for FakeInvoker {
    fn invoke(
        &mut self,
        file: PathBuf,
    ) -> Pin<Box<dyn Future<Output = InvocationOutcome> + Send + '_>> {
        let invoked = Arc::clone(&self.invoked);
        let pass = self.pass;

        Box::pin(async move {
            {
                let mut guard = invoked.lock().unwrap();
                guard.push(file.clone());
            }

            InvocationOutcome {
                file,
                passed: pass,
                output: String::from("fake output\n"),
            }
        })
    }
}
