// src/exec/backend.rs

//! Pluggable invocation backend abstraction.
//!
//! The daemon talks to an `InvocationBackend` instead of the `TestRunner`
//! directly. This makes it easy to swap in a fake backend in tests while
//! keeping the production process handling in [`runner`].
//!
//! - `CommandBackend` is the default implementation used by `autotest`.
//!   It wraps a [`TestRunner`] and spawns a real process per invocation.
//! - Tests can provide their own `InvocationBackend` that, for example,
//!   records which files were invoked and returns scripted outcomes.

use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;

use crate::exec::runner::TestRunner;
use crate::exec::InvocationOutcome;

/// Trait abstracting how a changed file's test invocation is executed.
///
/// Production code uses [`CommandBackend`]; tests can provide their own
/// implementation that doesn't spawn real processes.
pub trait InvocationBackend: Send {
    /// Run the test invocation for one changed file and return its outcome.
    ///
    /// The outcome must reflect a fully completed invocation: process
    /// exited, output drained.
    fn invoke(
        &mut self,
        file: PathBuf,
    ) -> Pin<Box<dyn Future<Output = InvocationOutcome> + Send + '_>>;
}

/// Real invocation backend used in production.
pub struct CommandBackend {
    runner: TestRunner,
}

impl CommandBackend {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            runner: TestRunner::new(command),
        }
    }
}

impl InvocationBackend for CommandBackend {
    fn invoke(
        &mut self,
        file: PathBuf,
    ) -> Pin<Box<dyn Future<Output = InvocationOutcome> + Send + '_>> {
        // Clone the runner so the future doesn't borrow `self` across `await`.
        let runner = self.runner.clone();
        Box::pin(async move { runner.run(&file).await })
    }
}
