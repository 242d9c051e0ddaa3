//! Error types used by backoff schedules and lifecycle orchestration.
//!
//! This module defines two main error enums:
//!
//! - [`ConfigError`]: a malformed backoff interval, rejected when it is added.
//! - [`StartError`]: a failure reported by a component while starting.
//!
//! Both types provide helper methods (`as_label`, `as_message`) for logging/metrics
//! and additional utilities such as [`StartError::is_retryable`].

use std::time::Duration;
use thiserror::Error;

/// # Errors produced while configuring a backoff schedule.
///
/// These are programming errors: the interval can never be used and the
/// caller should fix its plan rather than retry.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Either the span or the wait is zero.
    #[error("span {span:?} and wait {wait:?} must both be > 0")]
    ZeroDuration {
        /// Total span of the interval.
        span: Duration,
        /// Per-repetition wait.
        wait: Duration,
    },

    /// The wait is longer than the span it should fit into.
    #[error("wait {wait:?} cannot exceed span {span:?}")]
    WaitExceedsSpan {
        /// Total span of the interval.
        span: Duration,
        /// Per-repetition wait.
        wait: Duration,
    },

    /// The span is not an exact multiple of the wait.
    #[error("span {span:?} must be divisible by wait {wait:?}")]
    NotDivisible {
        /// Total span of the interval.
        span: Duration,
        /// Per-repetition wait.
        wait: Duration,
    },

    /// The implied repeat count does not fit in a `u64`.
    #[error("span {span:?} / wait {wait:?} overflows the repeat counter")]
    TooManyRepeats {
        /// Total span of the interval.
        span: Duration,
        /// Per-repetition wait.
        wait: Duration,
    },
}

impl ConfigError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use stagehand::ConfigError;
    /// use std::time::Duration;
    ///
    /// let err = ConfigError::NotDivisible { span: Duration::from_secs(10), wait: Duration::from_secs(8) };
    /// assert_eq!(err.as_label(), "config_not_divisible");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            ConfigError::ZeroDuration { .. } => "config_zero_duration",
            ConfigError::WaitExceedsSpan { .. } => "config_wait_exceeds_span",
            ConfigError::NotDivisible { .. } => "config_not_divisible",
            ConfigError::TooManyRepeats { .. } => "config_too_many_repeats",
        }
    }
}

/// # Errors produced by a component's start operation.
///
/// The orchestrator never inspects these: it records whatever the component
/// returned and hands it back unchanged. [`StartError::Panicked`] is the one
/// variant the orchestrator creates itself, when a start panics.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StartError {
    /// Start failed but may succeed if retried.
    #[error("start failed: {error}")]
    Fail {
        /// The underlying error message.
        error: String,
    },

    /// Non-recoverable error (should not be retried).
    #[error("fatal start error (no retry): {error}")]
    Fatal {
        /// The underlying error message.
        error: String,
    },

    /// Start did not complete within the component's own deadline.
    #[error("start timed out after {timeout:?}")]
    Timeout {
        /// The timeout duration that was exceeded.
        timeout: Duration,
    },

    /// Start was abandoned because the caller cancelled it.
    #[error("start cancelled")]
    Cancelled,

    /// The start future panicked.
    #[error("start panicked: {info}")]
    Panicked {
        /// Panic payload rendered as text.
        info: String,
    },
}

impl StartError {
    /// Shorthand for a retryable [`StartError::Fail`].
    pub fn fail(error: impl Into<String>) -> Self {
        StartError::Fail {
            error: error.into(),
        }
    }

    /// Shorthand for a non-retryable [`StartError::Fatal`].
    pub fn fatal(error: impl Into<String>) -> Self {
        StartError::Fatal {
            error: error.into(),
        }
    }

    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use stagehand::StartError;
    /// use std::time::Duration;
    ///
    /// let err = StartError::Timeout { timeout: Duration::from_secs(1) };
    /// assert_eq!(err.as_label(), "start_timeout");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            StartError::Fail { .. } => "start_failed",
            StartError::Fatal { .. } => "start_fatal",
            StartError::Timeout { .. } => "start_timeout",
            StartError::Cancelled => "start_cancelled",
            StartError::Panicked { .. } => "start_panicked",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            StartError::Fail { error } => format!("error: {error}"),
            StartError::Fatal { error } => format!("fatal: {error}"),
            StartError::Timeout { timeout } => format!("timeout: {timeout:?}"),
            StartError::Cancelled => "start cancelled".to_string(),
            StartError::Panicked { info } => format!("panic: {info}"),
        }
    }

    /// Indicates whether the error type is safe to retry.
    ///
    /// Returns `true` for [`StartError::Fail`] and [`StartError::Timeout`],
    /// `false` otherwise.
    ///
    /// # Example
    /// ```
    /// use stagehand::StartError;
    ///
    /// assert!(StartError::fail("connection refused").is_retryable());
    /// assert!(!StartError::fatal("bad credentials").is_retryable());
    /// ```
    pub fn is_retryable(&self) -> bool {
        matches!(self, StartError::Fail { .. } | StartError::Timeout { .. })
    }
}
