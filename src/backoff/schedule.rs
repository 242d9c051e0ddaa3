//! # Interval-based backoff schedule.
//!
//! A [`Schedule`] walks an ordered list of [`Interval`]s. Each
//! [`advance`](Schedule::advance) waits for the current interval's `wait`,
//! counts one repetition, and moves to the next interval once the current one
//! is spent. When nothing is left, `advance` returns [`Step::Exhausted`]
//! without waiting and rearms the schedule, so the same instance can drive the
//! next retry cycle.
//!
//! ## Traversal
//! ```text
//! intervals: [ (60s, 1s) ][ (60s, 10s) ][ (600s, 60s) ]
//! steps:       1s × 60      10s × 6       60s × 10       → Exhausted (reset)
//!              ▲ cursor moves right only; never revisits until reset
//! ```
//!
//! ## Cancellation
//! - [`Canceller::cancel`] interrupts the wait that is in flight *right now*;
//!   it never blocks and leaves nothing behind for later calls.
//! - A bound [`CancellationToken`] (see [`Schedule::with_cancellation`]) ends
//!   every wait from the moment it is cancelled.
//!
//! In both cases `advance` returns [`Step::Cancelled`]. The interrupted step
//! still counts as consumed.
//!
//! ## Rules
//! - Single writer: `advance`/`reset`/`add_interval` take `&mut self`.
//! - Intervals appended between `advance` calls join the tail of the current
//!   cycle; the cursor is never moved by an append.
//!
//! # Example
//! ```rust
//! use std::time::Duration;
//! use stagehand::{Schedule, Step};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), stagehand::ConfigError> {
//! let mut schedule = Schedule::new();
//! schedule
//!     .add_interval(Duration::from_millis(4), Duration::from_millis(1))?
//!     .add_interval(Duration::from_millis(4), Duration::from_millis(2))?;
//! assert_eq!(schedule.total_steps(), 6);
//!
//! let mut attempts = 0;
//! while schedule.advance().await == Step::Continue {
//!     attempts += 1;
//! }
//! assert_eq!(attempts, 6);
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;
use std::time::Duration;

use tokio::{sync::Notify, time};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use super::{Interval, Step};
use crate::error::ConfigError;

/// Ordered backoff intervals plus traversal state.
#[derive(Debug, Default)]
pub struct Schedule {
    intervals: Vec<Interval>,
    /// Index of the interval the next `advance` waits on.
    current: usize,
    /// Set by `advance`; cleared by a reset that actually rewound something.
    should_reset: bool,
    interrupt: Arc<Notify>,
    token: CancellationToken,
}

/// Handle that interrupts the in-flight wait of one [`Schedule`].
///
/// Cheap to clone; safe to use from any task while the schedule is being advanced elsewhere.
#[derive(Clone, Debug)]
pub struct Canceller {
    interrupt: Arc<Notify>,
}

impl Canceller {
    /// Interrupts the wait currently in progress, if any.
    ///
    /// Returns immediately. Has no effect when no `advance` is waiting.
    pub fn cancel(&self) {
        self.interrupt.notify_waiters();
    }
}

impl Schedule {
    /// Creates an empty schedule. Advancing it reports [`Step::Exhausted`] right away.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a schedule from already-validated intervals (progress is rewound).
    pub fn from_intervals(intervals: impl IntoIterator<Item = Interval>) -> Self {
        let mut intervals: Vec<Interval> = intervals.into_iter().collect();
        intervals.iter_mut().for_each(Interval::rewind);
        Self {
            intervals,
            ..Self::default()
        }
    }

    /// Builds a schedule from `(span, wait)` pairs, validating each one in order.
    pub fn from_plan(
        plan: impl IntoIterator<Item = (Duration, Duration)>,
    ) -> Result<Self, ConfigError> {
        let intervals = plan
            .into_iter()
            .map(|(span, wait)| Interval::new(span, wait))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::from_intervals(intervals))
    }

    /// Ends every wait as soon as `token` is cancelled.
    ///
    /// Use a child of the runtime token so process shutdown also stops retry loops.
    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.token = token;
        self
    }

    /// Appends an interval that waits `wait` per step until `span` is covered.
    ///
    /// Validation happens here, never at the first `advance`.
    pub fn add_interval(
        &mut self,
        span: Duration,
        wait: Duration,
    ) -> Result<&mut Self, ConfigError> {
        self.intervals.push(Interval::new(span, wait)?);
        Ok(self)
    }

    /// Returns a handle that can interrupt an in-flight [`advance`](Self::advance).
    pub fn canceller(&self) -> Canceller {
        Canceller {
            interrupt: Arc::clone(&self.interrupt),
        }
    }

    /// Waits for the next step of the schedule.
    ///
    /// ### Flow
    /// 1. Cursor past the last interval → reset, return [`Step::Exhausted`] (no wait)
    /// 2. Wait the current interval's `wait`, or until cancelled
    /// 3. Count the repetition; move the cursor if the interval is spent
    /// 4. Return [`Step::Continue`] or [`Step::Cancelled`]
    pub async fn advance(&mut self) -> Step {
        self.should_reset = true;

        let Some(wait) = self.intervals.get(self.current).map(Interval::wait) else {
            self.reset();
            debug!(intervals = self.intervals.len(), "backoff schedule exhausted");
            return Step::Exhausted;
        };

        debug!(interval = self.current, ?wait, "backoff wait");
        let step = self.sleep(wait).await;

        if self.intervals[self.current].consume() {
            self.current += 1;
        }
        if step == Step::Cancelled {
            debug!(interval = self.current, "backoff wait cancelled");
        }
        step
    }

    async fn sleep(&self, wait: Duration) -> Step {
        // Registered before the select so a cancel racing the first poll is not lost.
        let interrupted = self.interrupt.notified();
        tokio::select! {
            biased;
            _ = interrupted => Step::Cancelled,
            _ = self.token.cancelled() => Step::Cancelled,
            _ = time::sleep(wait) => Step::Continue,
        }
    }

    /// Returns the wait the next `advance` will use, or `Duration::ZERO` when exhausted.
    pub fn peek_next_wait(&self) -> Duration {
        self.intervals
            .get(self.current)
            .map_or(Duration::ZERO, Interval::wait)
    }

    /// Rewinds the cursor and all interval progress.
    ///
    /// Returns `false` (and does nothing) if `advance` has not been called
    /// since the previous reset, including the automatic one on exhaustion.
    pub fn reset(&mut self) -> bool {
        if !self.should_reset {
            return false;
        }
        self.current = 0;
        self.intervals.iter_mut().for_each(Interval::rewind);
        self.should_reset = false;
        debug!("backoff schedule reset");
        true
    }

    /// `true` once every interval of the current cycle has been consumed.
    pub fn is_exhausted(&self) -> bool {
        self.current == self.intervals.len()
    }

    /// The configured intervals, in traversal order.
    pub fn intervals(&self) -> &[Interval] {
        &self.intervals
    }

    /// Number of intervals.
    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    /// True if no interval has been added.
    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    /// Number of `advance` calls that return [`Step::Continue`] per cycle.
    pub fn total_steps(&self) -> u64 {
        self.intervals
            .iter()
            .fold(0u64, |acc, i| acc.saturating_add(i.repeat_count()))
    }

    /// Sum of all interval spans: the time one uninterrupted cycle takes.
    pub fn total_span(&self) -> Duration {
        self.intervals
            .iter()
            .fold(Duration::ZERO, |acc, i| acc.saturating_add(i.span()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::Instant;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn secs(n: u64) -> Duration {
        Duration::from_secs(n)
    }

    fn three_phase() -> Schedule {
        let mut s = Schedule::new();
        s.add_interval(secs(60), secs(1))
            .unwrap()
            .add_interval(secs(60), secs(10))
            .unwrap()
            .add_interval(secs(600), secs(60))
            .unwrap();
        s
    }

    /// Advances until `Exhausted`, checking every peeked wait against the time actually spent.
    async fn drain(s: &mut Schedule) -> Vec<Duration> {
        let mut waited = Vec::new();
        loop {
            let peeked = s.peek_next_wait();
            let before = Instant::now();
            match s.advance().await {
                Step::Continue => {
                    let elapsed = before.elapsed();
                    assert!(
                        elapsed >= peeked && elapsed - peeked < ms(1),
                        "step {}: peeked {:?}, waited {:?}",
                        waited.len() + 1,
                        peeked,
                        elapsed
                    );
                    waited.push(peeked);
                }
                Step::Exhausted => return waited,
                Step::Cancelled => panic!("unexpected cancellation"),
            }
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_three_phase_plan_runs_76_steps() {
        let mut s = three_phase();
        assert_eq!(s.total_steps(), 76);

        let waited = drain(&mut s).await;
        assert_eq!(waited.len(), 76);
        assert_eq!(waited[0], secs(1));
        assert_eq!(waited[65], secs(10));
        assert_eq!(waited[75], secs(60));
    }

    #[tokio::test(start_paused = true)]
    async fn test_rearms_after_exhaustion() {
        let mut s = three_phase();
        let first = drain(&mut s).await;
        assert_eq!(s.peek_next_wait(), secs(1));
        let second = drain(&mut s).await;
        assert_eq!(first, second);
    }

    #[tokio::test(start_paused = true)]
    async fn test_small_plan_waits_each_step() {
        let mut s = Schedule::new();
        s.add_interval(ms(10), ms(1)).unwrap();

        let started = Instant::now();
        let mut sleeps = 0;
        while s.advance().await != Step::Exhausted {
            sleeps += 1;
        }
        assert_eq!(sleeps, 10);
        assert!(started.elapsed() >= ms(10));
    }

    #[tokio::test]
    async fn test_empty_schedule_is_exhausted_immediately() {
        let mut s = Schedule::new();
        assert!(s.is_empty());
        assert!(s.is_exhausted());
        assert_eq!(s.peek_next_wait(), Duration::ZERO);
        assert_eq!(s.advance().await, Step::Exhausted);
        assert_eq!(s.advance().await, Step::Exhausted);
    }

    #[tokio::test(start_paused = true)]
    async fn test_peek_is_zero_at_end_of_cycle() {
        let mut s = Schedule::from_plan([(ms(2), ms(1))]).unwrap();
        assert_eq!(s.advance().await, Step::Continue);
        assert_eq!(s.peek_next_wait(), ms(1));
        assert_eq!(s.advance().await, Step::Continue);
        assert!(s.is_exhausted());
        assert_eq!(s.peek_next_wait(), Duration::ZERO);
        assert_eq!(s.advance().await, Step::Exhausted);
        assert_eq!(s.peek_next_wait(), ms(1));
    }

    #[tokio::test(start_paused = true)]
    async fn test_reset_reports_whether_it_did_work() {
        let mut s = Schedule::from_plan([(ms(30), ms(10))]).unwrap();
        assert!(!s.reset(), "fresh schedule has nothing to reset");

        s.advance().await;
        assert_eq!(s.intervals()[0].progress(), 1);
        assert!(s.reset());
        assert_eq!(s.intervals()[0].progress(), 0);
        assert!(!s.reset());
    }

    #[tokio::test(start_paused = true)]
    async fn test_reset_after_auto_reset_is_noop() {
        let mut s = Schedule::from_plan([(ms(1), ms(1))]).unwrap();
        assert_eq!(s.advance().await, Step::Continue);
        assert_eq!(s.advance().await, Step::Exhausted);
        assert!(!s.reset());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_interrupts_in_flight_wait() {
        let mut s = Schedule::from_plan([(ms(1000), ms(10))]).unwrap();
        let canceller = s.canceller();
        let cancel = tokio::spawn(async move {
            time::sleep(ms(15)).await;
            canceller.cancel();
        });

        let mut sleeps = 0;
        let outcome = loop {
            match s.advance().await {
                Step::Continue => sleeps += 1,
                other => break other,
            }
        };
        cancel.await.unwrap();

        assert_eq!(sleeps, 1);
        assert_eq!(outcome, Step::Cancelled);
        // The interrupted step is consumed too.
        assert_eq!(s.intervals()[0].progress(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_without_waiter_has_no_effect() {
        let mut s = Schedule::from_plan([(ms(20), ms(10))]).unwrap();
        s.canceller().cancel();
        assert_eq!(s.advance().await, Step::Continue);
    }

    #[tokio::test(start_paused = true)]
    async fn test_bound_token_cancels_every_wait() {
        let token = CancellationToken::new();
        let mut s = Schedule::from_plan([(secs(60), secs(1))])
            .unwrap()
            .with_cancellation(token.clone());

        token.cancel();
        let started = Instant::now();
        assert_eq!(s.advance().await, Step::Cancelled);
        assert_eq!(s.advance().await, Step::Cancelled);
        assert_eq!(started.elapsed(), Duration::ZERO);
        assert!(Step::Cancelled.should_stop());
    }

    #[tokio::test(start_paused = true)]
    async fn test_append_between_steps_extends_current_cycle() {
        let mut s = Schedule::from_plan([(ms(20), ms(10))]).unwrap();
        assert_eq!(s.advance().await, Step::Continue);

        s.add_interval(ms(10), ms(5)).unwrap();
        assert_eq!(s.peek_next_wait(), ms(10));

        let rest = drain(&mut s).await;
        assert_eq!(rest, vec![ms(10), ms(5), ms(5)]);
    }

    #[test]
    fn test_rejects_bad_intervals_at_add_time() {
        let mut s = Schedule::new();
        assert!(s.add_interval(Duration::ZERO, Duration::ZERO).is_err());
        assert!(s.add_interval(Duration::ZERO, ms(1)).is_err());
        assert!(s.add_interval(ms(1), Duration::ZERO).is_err());
        assert!(s.add_interval(ms(1), ms(2)).is_err());
        assert!(s.add_interval(ms(10), ms(8)).is_err());
        assert!(s.is_empty());
    }

    #[test]
    fn test_totals() {
        let s = three_phase();
        assert_eq!(s.len(), 3);
        assert_eq!(s.total_span(), secs(720));
        assert!(Schedule::from_plan([(ms(10), ms(8))]).is_err());
    }
}
