//! # Outcome of one [`Schedule::advance`](crate::Schedule::advance) call.
//!
//! - [`Step::Continue`] the full wait elapsed; try again.
//! - [`Step::Cancelled`] the wait was interrupted; stop looping.
//! - [`Step::Exhausted`] every interval has been consumed; the schedule has
//!   already rearmed itself for the next cycle.
//!
//! Cancellation and exhaustion are kept apart so a retry loop can tell
//! "someone asked me to stop" from "I ran out of patience". Loops that only
//! care about whether to keep going can use [`Step::should_stop`].

/// Result of advancing a backoff schedule by one step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    /// Waited the full duration of the current step.
    Continue,
    /// The wait was interrupted by a [`Canceller`](crate::Canceller) or a bound token.
    Cancelled,
    /// No steps were left; nothing was waited and the schedule was reset.
    Exhausted,
}

impl Step {
    /// `true` for [`Step::Cancelled`] and [`Step::Exhausted`].
    #[inline]
    pub fn should_stop(self) -> bool {
        !matches!(self, Step::Continue)
    }

    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(self) -> &'static str {
        match self {
            Step::Continue => "continue",
            Step::Cancelled => "cancelled",
            Step::Exhausted => "exhausted",
        }
    }
}
