//! # Orchestrator: configured entry point for group and retried starts.
//!
//! The [`Orchestrator`] owns a validated [`Config`] and forwards to the free
//! functions in [`lifecycle`](crate::lifecycle), filling in the configured
//! stop grace and backoff plan.
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use std::time::Duration;
//! use async_trait::async_trait;
//! use stagehand::{ComponentRef, Config, Orchestrator, Start, StartError, Stop, StopSignal};
//!
//! struct Listener;
//!
//! impl Stop for Listener {
//!     fn stop(&self, _grace: Duration) {}
//!     fn stopped(&self) -> StopSignal { StopSignal::completed() }
//! }
//!
//! #[async_trait]
//! impl Start for Listener {
//!     fn name(&self) -> &str { "listener" }
//!     async fn start(&self) -> Result<(), StartError> { Ok(()) }
//! }
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let orchestrator = Orchestrator::new(Config::default())?;
//!
//!     let group: Vec<ComponentRef> = vec![Arc::new(Listener) as ComponentRef];
//!     let failures = orchestrator.start_all_or_compensate(&group).await;
//!     assert!(failures.is_empty());
//!     Ok(())
//! }
//! ```

use tokio_util::sync::CancellationToken;

use crate::backoff::{Interval, Schedule};
use crate::config::Config;
use crate::error::{ConfigError, StartError};
use crate::lifecycle::{self, ComponentRef, Start, StartFailures};

/// Group start/stop and retried starts driven by one [`Config`].
#[derive(Debug)]
pub struct Orchestrator {
    cfg: Config,
    plan: Vec<Interval>,
    token: CancellationToken,
}

impl Orchestrator {
    /// Validates the backoff plan in `cfg` and creates an orchestrator.
    pub fn new(cfg: Config) -> Result<Self, ConfigError> {
        let plan = cfg
            .backoff
            .iter()
            .map(|e| Interval::new(e.span, e.wait))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            cfg,
            plan,
            token: CancellationToken::new(),
        })
    }

    /// Binds every schedule created from now on to `token` (e.g. a shutdown token).
    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.token = token;
        self
    }

    /// The configuration this orchestrator was built from.
    pub fn config(&self) -> &Config {
        &self.cfg
    }

    /// A fresh schedule following the configured plan.
    pub fn schedule(&self) -> Schedule {
        Schedule::from_intervals(self.plan.iter().cloned())
            .with_cancellation(self.token.child_token())
    }

    /// See [`lifecycle::start_all`].
    pub async fn start_all(&self, components: &[ComponentRef]) -> StartFailures {
        lifecycle::start_all(components).await
    }

    /// See [`lifecycle::start_all_or_compensate`]; uses [`Config::stop_grace`].
    pub async fn start_all_or_compensate(&self, components: &[ComponentRef]) -> StartFailures {
        lifecycle::start_all_or_compensate(self.cfg.stop_grace, components).await
    }

    /// See [`lifecycle::start_with_retry`]; each call gets its own fresh schedule.
    pub async fn start_with_retry<S>(&self, component: &S) -> Result<(), StartError>
    where
        S: Start + ?Sized,
    {
        let mut schedule = self.schedule();
        lifecycle::start_with_retry(component, &mut schedule).await
    }
}
