//! # Example: retry_start
//!
//! Demonstrates the two halves of stagehand working together:
//! 1. a flaky database connection is started with [`Orchestrator::start_with_retry`],
//!    paced by a short backoff plan;
//! 2. a group of three components is started with compensation: the broker
//!    fails, so the cache and the HTTP server are stopped again before the call
//!    returns.
//!
//! ## Flow
//! ```text
//! start_with_retry(db)
//!   ├─► start → Err("refused #1") → wait 100ms
//!   ├─► start → Err("refused #2") → wait 100ms
//!   └─► start → Ok
//!
//! start_all_or_compensate([cache, http, broker])
//!   ├─► cache  → Ok
//!   ├─► http   → Ok
//!   ├─► broker → Err("no route to host")
//!   └─► stop(cache), stop(http) → wait for both StopSignals
//! ```
//!
//! ## Run
//! ```bash
//! RUST_LOG=debug cargo run --example retry_start
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use stagehand::{
    ComponentRef, Config, Orchestrator, PlanEntry, Start, StartError, Stop, StopSignal,
};
use tokio::time;
use tracing_subscriber::EnvFilter;

/// Refuses the first two connection attempts.
struct Database {
    attempts: AtomicU32,
}

impl Stop for Database {
    fn stop(&self, _grace: Duration) {}

    fn stopped(&self) -> StopSignal {
        StopSignal::completed()
    }
}

#[async_trait]
impl Start for Database {
    fn name(&self) -> &str {
        "database"
    }

    async fn start(&self) -> Result<(), StartError> {
        let n = self.attempts.fetch_add(1, Ordering::SeqCst) + 1;
        if n < 3 {
            return Err(StartError::fail(format!("refused #{n}")));
        }
        println!("[database] connected after {n} attempts");
        Ok(())
    }
}

/// Starts after `delay`; fails with `error` if set. Teardown takes 200ms.
struct Service {
    name: &'static str,
    delay: Duration,
    error: Option<&'static str>,
    stopped: StopSignal,
}

impl Service {
    fn new(name: &'static str, delay: Duration, error: Option<&'static str>) -> ComponentRef {
        Arc::new(Self {
            name,
            delay,
            error,
            stopped: StopSignal::new(),
        })
    }
}

impl Stop for Service {
    fn stop(&self, grace: Duration) {
        println!("[{}] stopping (grace={grace:?})", self.name);
        let signal = self.stopped.clone();
        let name = self.name;
        tokio::spawn(async move {
            time::sleep(Duration::from_millis(200)).await;
            println!("[{name}] stopped");
            signal.complete();
        });
    }

    fn stopped(&self) -> StopSignal {
        self.stopped.clone()
    }
}

#[async_trait]
impl Start for Service {
    fn name(&self) -> &str {
        self.name
    }

    async fn start(&self) -> Result<(), StartError> {
        time::sleep(self.delay).await;
        match self.error {
            Some(e) => Err(StartError::fail(e)),
            None => {
                println!("[{}] started", self.name);
                Ok(())
            }
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let orchestrator = Orchestrator::new(Config {
        stop_grace: Duration::from_secs(2),
        backoff: vec![PlanEntry::new(
            Duration::from_millis(500),
            Duration::from_millis(100),
        )],
    })?;

    let db = Database {
        attempts: AtomicU32::new(0),
    };
    orchestrator.start_with_retry(&db).await?;

    let group = vec![
        Service::new("cache", Duration::from_millis(100), None),
        Service::new("http", Duration::from_millis(300), None),
        Service::new("broker", Duration::from_millis(200), Some("no route to host")),
    ];
    let failures = orchestrator.start_all_or_compensate(&group).await;

    for (component, error) in failures.iter() {
        println!("[{}] failed to start: {error}", component.name());
    }
    println!("group failed={} (started components stopped)", failures.len());
    Ok(())
}
