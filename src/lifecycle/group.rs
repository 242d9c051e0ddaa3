//! # Group start/stop with compensation.
//!
//! Free functions that fan out over a group of components and fan back in:
//! - [`start_all`] starts every component concurrently and reports failures;
//! - [`start_all_or_compensate`] does the same, then stops whatever started if anything failed;
//! - [`stop_all`] requests a stop of every component and returns one combined [`StopSignal`];
//! - [`start_with_retry`] retries one component's start, paced by a [`Schedule`].
//!
//! ## Flow
//! ```text
//! start_all_or_compensate(grace, [c1, c2, c3])
//!   ├─► start_all
//!   │     ├─ spawn c1.start() ──► Ok
//!   │     ├─ spawn c2.start() ──► Ok
//!   │     └─ spawn c3.start() ──► Err(e) ──► lock ─► failures[c3] = e
//!   │     join all
//!   ├─► failures empty? ──► return
//!   └─► compensate
//!         ├─ spawn { c1.stop(grace); c1.stopped().wait() }
//!         └─ spawn { c2.stop(grace); c2.stopped().wait() }
//!         join all ──► return failures
//! ```
//!
//! ## Rules
//! - Every start is attempted exactly once; one failure never prevents another attempt.
//! - No ordering between components; only "all finished" before returning.
//! - A panicking start is recorded as [`StartError::Panicked`], whether it panics
//!   while building its future or while running it.
//! - A compensating stop that panics is logged and its signal is not awaited.
//! - Stop outcomes are not reported: the caller only learns that every stop
//!   was requested and signalled completion. The wait on those signals has no
//!   overall deadline; wrap the call in `tokio::time::timeout` if one is needed.
//! - Dropping the returned future aborts the spawned starts/stops still in flight.

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;

use futures::FutureExt;
use tokio::{sync::Mutex, task::JoinSet};
use tracing::{debug, info, warn};

use super::{ComponentRef, Start, StartFailures, Stop, StopSignal};
use crate::backoff::{Schedule, Step};
use crate::error::StartError;

/// Starts every component concurrently and waits for all of them.
///
/// Returns only the failures; an empty report means everything started.
/// Started components are left running.
pub async fn start_all(components: &[ComponentRef]) -> StartFailures {
    let failures = Arc::new(Mutex::new(StartFailures::new()));
    let mut set = JoinSet::new();

    debug!(components = components.len(), "starting group");
    for component in components {
        let component = Arc::clone(component);
        let failures = Arc::clone(&failures);

        set.spawn(async move {
            let res = AssertUnwindSafe(async { component.start().await })
                .catch_unwind()
                .await
                .unwrap_or_else(|panic| {
                    Err(StartError::Panicked {
                        info: panic_info(panic.as_ref()),
                    })
                });

            if let Err(error) = res {
                warn!(
                    component = component.name(),
                    error = error.as_label(),
                    "start failed: {error}"
                );
                failures.lock().await.insert(component, error);
            }
        });
    }
    while let Some(res) = set.join_next().await {
        if let Err(e) = res {
            warn!(error = %e, "start task failed to join");
        }
    }

    let mut failures = failures.lock().await;
    std::mem::take(&mut *failures)
}

/// Starts every component; if any fails, stops all the others and waits for them.
///
/// Each compensating stop gets `grace` as its budget. The returned report is
/// the one produced by [`start_all`]; stop results never appear in it.
pub async fn start_all_or_compensate(
    grace: Duration,
    components: &[ComponentRef],
) -> StartFailures {
    let failures = start_all(components).await;
    if failures.is_empty() {
        return failures;
    }

    let started: Vec<ComponentRef> = components
        .iter()
        .filter(|c| !failures.contains(c))
        .cloned()
        .collect();
    info!(
        failed = failures.len(),
        compensating = started.len(),
        ?grace,
        "group start failed; stopping started components"
    );

    let mut set = JoinSet::new();
    for component in started {
        set.spawn(async move {
            let name = component.name();
            let stop = AssertUnwindSafe(|| component.stop(grace));
            if let Err(payload) = std::panic::catch_unwind(stop) {
                warn!(
                    component = name,
                    "compensating stop panicked: {}",
                    panic_info(payload.as_ref())
                );
                return;
            }
            component.stopped().wait().await;
            debug!(component = name, "compensating stop complete");
        });
    }
    while let Some(res) = set.join_next().await {
        if let Err(e) = res {
            warn!(error = %e, "compensating stop task failed to join");
        }
    }

    info!(failed = failures.len(), "compensation complete");
    failures
}

/// Requests a stop of every component and returns a signal that fires once all have stopped.
///
/// Returns immediately; must be called from within a tokio runtime.
pub fn stop_all<S>(stoppers: &[Arc<S>], grace: Duration) -> StopSignal
where
    S: Stop + ?Sized,
{
    let signals: Vec<StopSignal> = stoppers
        .iter()
        .map(|s| {
            s.stop(grace);
            s.stopped()
        })
        .collect();

    let all = StopSignal::new();
    let done = all.clone();
    tokio::spawn(async move {
        for signal in &signals {
            signal.wait().await;
        }
        done.complete();
    });
    all
}

/// Starts `component`, retrying retryable failures with waits taken from `schedule`.
///
/// ### Exit conditions
/// - start succeeds → `Ok(())`, schedule reset for the next outage
/// - non-retryable error → that error, immediately
/// - schedule exhausted → the last start error (schedule already rearmed)
/// - schedule cancelled → [`StartError::Cancelled`]
pub async fn start_with_retry<S>(
    component: &S,
    schedule: &mut Schedule,
) -> Result<(), StartError>
where
    S: Start + ?Sized,
{
    let mut attempt: u64 = 0;
    loop {
        attempt += 1;
        let error = match component.start().await {
            Ok(()) => {
                schedule.reset();
                return Ok(());
            }
            Err(e) => e,
        };

        if !error.is_retryable() {
            warn!(
                component = component.name(),
                attempt,
                error = error.as_label(),
                "start failed; not retryable"
            );
            return Err(error);
        }

        let wait = schedule.peek_next_wait();
        match schedule.advance().await {
            Step::Continue => {
                debug!(
                    component = component.name(),
                    attempt,
                    ?wait,
                    "retrying start: {error}"
                );
            }
            Step::Cancelled => return Err(StartError::Cancelled),
            Step::Exhausted => {
                warn!(
                    component = component.name(),
                    attempt,
                    "start retries exhausted: {error}"
                );
                return Err(error);
            }
        }
    }
}

fn panic_info(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
