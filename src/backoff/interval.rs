//! # One phase of a backoff plan.
//!
//! An [`Interval`] waits `wait` per repetition until `span` has been covered,
//! so it repeats exactly `span / wait` times.
//!
//! # Example
//! ```rust
//! use std::time::Duration;
//! use stagehand::Interval;
//!
//! let i = Interval::new(Duration::from_secs(60), Duration::from_secs(10)).unwrap();
//! assert_eq!(i.repeat_count(), 6);
//! assert_eq!(i.wait(), Duration::from_secs(10));
//!
//! // 10s does not divide into 8s steps.
//! assert!(Interval::new(Duration::from_secs(10), Duration::from_secs(8)).is_err());
//! ```

use std::time::Duration;

use crate::error::ConfigError;

/// A validated `(span, wait)` pair plus its traversal progress.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Interval {
    span: Duration,
    wait: Duration,
    count: u64,
    progress: u64,
}

impl Interval {
    /// Validates `span` and `wait` and builds a fresh interval.
    ///
    /// ### Errors
    /// - [`ConfigError::ZeroDuration`] if either value is zero;
    /// - [`ConfigError::WaitExceedsSpan`] if `wait > span`;
    /// - [`ConfigError::NotDivisible`] if `span % wait != 0`.
    pub fn new(span: Duration, wait: Duration) -> Result<Self, ConfigError> {
        if span.is_zero() || wait.is_zero() {
            return Err(ConfigError::ZeroDuration { span, wait });
        }
        if wait > span {
            return Err(ConfigError::WaitExceedsSpan { span, wait });
        }

        let (span_ns, wait_ns) = (span.as_nanos(), wait.as_nanos());
        if span_ns % wait_ns != 0 {
            return Err(ConfigError::NotDivisible { span, wait });
        }
        let count = u64::try_from(span_ns / wait_ns)
            .map_err(|_| ConfigError::TooManyRepeats { span, wait })?;

        Ok(Self {
            span,
            wait,
            count,
            progress: 0,
        })
    }

    /// Total time covered by this interval.
    pub fn span(&self) -> Duration {
        self.span
    }

    /// Wait per repetition.
    pub fn wait(&self) -> Duration {
        self.wait
    }

    /// Number of repetitions (`span / wait`).
    pub fn repeat_count(&self) -> u64 {
        self.count
    }

    /// Repetitions consumed since the last reset.
    pub fn progress(&self) -> u64 {
        self.progress
    }

    /// Repetitions left before the schedule moves past this interval.
    pub fn remaining(&self) -> u64 {
        self.count - self.progress
    }

    /// Records one repetition; returns `true` once the interval is spent.
    pub(crate) fn consume(&mut self) -> bool {
        if self.progress < self.count {
            self.progress += 1;
        }
        self.progress == self.count
    }

    pub(crate) fn rewind(&mut self) {
        self.progress = 0;
    }
}
