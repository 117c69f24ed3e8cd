use itertools::Itertools;
use std::panic;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::{error, warn};

/// Receives assertion failures.
///
/// Sinks are shared by every context derived from the same root, possibly
/// across threads, so they must be `Send + Sync`.
pub trait Sink: Send + Sync {
    /// Record a failure and let the test keep running.
    fn report_and_continue(&self, message: &str);

    /// Record a failure and stop the current test. Never returns.
    fn report_and_abort(&self, message: &str) -> !;

    /// Called on entry to every assertion. Sinks that track caller frames can
    /// use it to hide assertion internals from failure locations.
    fn mark_helper(&self) {}
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Sink for `#[test]` functions.
///
/// Aborting panics right away. Continued failures are collected and the
/// test panics with all of them when the sink is dropped.
#[derive(Debug, Default)]
pub struct TestSink {
    failures: Mutex<Vec<String>>,
}

impl TestSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failures(&self) -> Vec<String> {
        lock(&self.failures).clone()
    }

    fn summary(failures: &[String]) -> String {
        format!(
            "{} assertion(s) failed:\n{}",
            failures.len(),
            failures.iter().join("\n")
        )
    }
}

impl Sink for TestSink {
    fn report_and_continue(&self, message: &str) {
        warn!(failure = message, "assertion failed");
        lock(&self.failures).push(message.to_string());
    }

    fn report_and_abort(&self, message: &str) -> ! {
        error!(failure = message, "required assertion failed");
        let summary = {
            let mut failures = lock(&self.failures);
            failures.push(message.to_string());
            let summary = Self::summary(&failures);
            // reported here; dropping must not panic a second time
            failures.clear();
            summary
        };
        panic!("{summary}");
    }
}

impl Drop for TestSink {
    fn drop(&mut self) {
        let failures = std::mem::take(&mut *lock(&self.failures));
        if !failures.is_empty() && !std::thread::panicking() {
            panic!("{}", Self::summary(&failures));
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Continue,
    Abort,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub mode: Mode,
    pub message: String,
}

/// Unwind payload used by [`Recorder`] when a required assertion fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Aborted {
    pub message: String,
}

/// Sink that only records what it is told. Useful for testing assertions
/// themselves.
///
/// `report_and_abort` records the report, then unwinds with an [`Aborted`]
/// payload without invoking the panic hook.
#[derive(Debug, Default)]
pub struct Recorder {
    reports: Mutex<Vec<Report>>,
    helper_marks: AtomicUsize,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reports(&self) -> Vec<Report> {
        lock(&self.reports).clone()
    }

    pub fn messages(&self) -> Vec<String> {
        lock(&self.reports).iter().map(|r| r.message.clone()).collect()
    }

    pub fn last_message(&self) -> Option<String> {
        lock(&self.reports).last().map(|r| r.message.clone())
    }

    pub fn is_clean(&self) -> bool {
        lock(&self.reports).is_empty()
    }

    pub fn helper_marks(&self) -> usize {
        self.helper_marks.load(Ordering::Relaxed)
    }

    pub fn clear(&self) {
        lock(&self.reports).clear();
    }

    fn push(&self, mode: Mode, message: &str) {
        lock(&self.reports).push(Report {
            mode,
            message: message.to_string(),
        });
    }
}

impl Sink for Recorder {
    fn report_and_continue(&self, message: &str) {
        self.push(Mode::Continue, message);
    }

    fn report_and_abort(&self, message: &str) -> ! {
        self.push(Mode::Abort, message);
        panic::resume_unwind(Box::new(Aborted {
            message: message.to_string(),
        }))
    }

    fn mark_helper(&self) {
        self.helper_marks.fetch_add(1, Ordering::Relaxed);
    }
}
