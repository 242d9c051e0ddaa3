//! # Global orchestration configuration.
//!
//! Provides [`Config`] centralized settings for an [`Orchestrator`](crate::Orchestrator).
//!
//! Config is used in two ways:
//! 1. **Group starts**: `stop_grace` is the budget handed to each compensating stop
//! 2. **Retried starts**: `backoff` is the plan every fresh [`Schedule`] is built from
//!
//! ## Default plan
//! ```text
//! 60s at 1s  → 60 quick retries
//! 60s at 10s →  6 slower retries
//! 10m at 1m  → 10 patient retries   (76 retries, 12 minutes per cycle)
//! ```

use std::time::Duration;

use crate::backoff::Schedule;
use crate::error::ConfigError;

/// One `(span, wait)` entry of a backoff plan, before validation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlanEntry {
    /// Total time covered by this phase.
    pub span: Duration,
    /// Wait per retry within this phase.
    pub wait: Duration,
}

impl PlanEntry {
    /// Creates an entry; validation happens when a schedule is built.
    pub const fn new(span: Duration, wait: Duration) -> Self {
        Self { span, wait }
    }
}

/// Configuration for group starts and retried starts.
///
/// ## Field semantics
/// - `stop_grace`: Budget passed to each compensating `stop` call
/// - `backoff`: Ordered plan for retried starts (empty = never retry)
#[derive(Clone, Debug)]
pub struct Config {
    /// Time each started component is given to stop when its group fails to start.
    ///
    /// The orchestrator does not enforce it; it is the component's own budget.
    pub stop_grace: Duration,

    /// Backoff plan used by `Orchestrator::schedule` and `Orchestrator::start_with_retry`.
    pub backoff: Vec<PlanEntry>,
}

impl Config {
    /// Builds a fresh [`Schedule`] from [`Config::backoff`].
    ///
    /// Fails on the first malformed entry.
    pub fn schedule(&self) -> Result<Schedule, ConfigError> {
        Schedule::from_plan(self.backoff.iter().map(|e| (e.span, e.wait)))
    }

    /// Total time of one uninterrupted backoff cycle.
    #[inline]
    pub fn total_backoff(&self) -> Duration {
        self.backoff
            .iter()
            .fold(Duration::ZERO, |acc, e| acc.saturating_add(e.span))
    }
}

impl Default for Config {
    /// Default configuration:
    ///
    /// - `stop_grace = 30s`
    /// - `backoff = [(60s, 1s), (60s, 10s), (10m, 1m)]`
    fn default() -> Self {
        Self {
            stop_grace: Duration::from_secs(30),
            backoff: vec![
                PlanEntry::new(Duration::from_secs(60), Duration::from_secs(1)),
                PlanEntry::new(Duration::from_secs(60), Duration::from_secs(10)),
                PlanEntry::new(Duration::from_secs(600), Duration::from_secs(60)),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_plan_is_valid() {
        let cfg = Config::default();
        let schedule = cfg.schedule().unwrap();
        assert_eq!(schedule.total_steps(), 76);
        assert_eq!(cfg.total_backoff(), Duration::from_secs(720));
        assert_eq!(schedule.total_span(), cfg.total_backoff());
    }

    #[test]
    fn test_bad_entry_is_reported() {
        let cfg = Config {
            backoff: vec![
                PlanEntry::new(Duration::from_secs(1), Duration::from_millis(100)),
                PlanEntry::new(Duration::from_secs(1), Duration::from_secs(2)),
            ],
            ..Config::default()
        };
        assert_eq!(
            cfg.schedule().unwrap_err(),
            ConfigError::WaitExceedsSpan {
                span: Duration::from_secs(1),
                wait: Duration::from_secs(2)
            }
        );
    }
}
