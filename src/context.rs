//! Default per-test context handed to setup functions.
//!
//! The core never looks inside a context; it only forwards it to every setup
//! call. [`TestContext`] is the context used when a registry does not name its
//! own: a named, thread-safe log that mirrors each line to `tracing`.

use std::sync::{Mutex, MutexGuard, PoisonError};

#[derive(Debug, Default)]
pub struct TestContext {
    name: String,
    lines: Mutex<Vec<String>>,
}

impl TestContext {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            lines: Mutex::new(Vec::new()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Records a line for this test.
    pub fn log(&self, text: impl Into<String>) {
        let text = text.into();
        tracing::info!(test = %self.name, "{}", text);
        self.lines().push(text);
    }

    /// Snapshot of every line logged so far.
    pub fn logs(&self) -> Vec<String> {
        self.lines().clone()
    }

    // A panicking setup must not hide what was logged before it.
    fn lines(&self) -> MutexGuard<'_, Vec<String>> {
        self.lines.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
