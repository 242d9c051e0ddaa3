//! # stagehand
//!
//! **Stagehand** brings service components up and takes them down again.
//!
//! It provides two coordination primitives meant to be embedded in
//! long-running services:
//! - a **backoff schedule** that paces a retry loop through a fixed sequence of
//!   `(span, wait)` intervals, can be cancelled mid-wait and rearms itself once
//!   exhausted;
//! - a **lifecycle orchestrator** that starts a group of components
//!   concurrently and, if any of them fails, stops every one that did start and
//!   waits for the teardown before returning.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!  ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//!  │  Component   │   │  Component   │   │  Component   │
//!  │ (Start+Stop) │   │ (Start+Stop) │   │ (Start+Stop) │
//!  └──────┬───────┘   └──────┬───────┘   └──────┬───────┘
//!         ▼                  ▼                  ▼
//! ┌──────────────────────────────────────────────────────────────┐
//! │  start_all / start_all_or_compensate                         │
//! │  - one spawned task per component (JoinSet)                  │
//! │  - failures recorded under a Mutex, keyed by identity        │
//! │  - on failure: stop(grace) every started component and wait  │
//! │    for its StopSignal                                        │
//! └──────────────────────────────┬───────────────────────────────┘
//!                                ▼
//!                          StartFailures
//!
//! ┌──────────────────────────────────────────────────────────────┐
//! │  Schedule                                                    │
//! │  [ (span, wait) ][ (span, wait) ] ...  cursor ─►             │
//! │  advance(): sleep(wait) ─┬─ elapsed          → Continue      │
//! │                          ├─ Canceller/token  → Cancelled     │
//! │                          └─ nothing left     → Exhausted     │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! ### Retried start
//! ```text
//! start_with_retry(component, schedule)
//! loop {
//!   ├─► component.start()
//!   │       ├─ Ok            ─► schedule.reset(), return Ok
//!   │       ├─ Err(fatal)    ─► return Err
//!   │       └─ Err(retry)    ─► schedule.advance()
//!   │                             ├─ Continue  ─► loop
//!   │                             ├─ Cancelled ─► return Err(Cancelled)
//!   │                             └─ Exhausted ─► return last Err
//! }
//! ```
//!
//! ## Features
//! | Area              | Description                                                   | Key types / functions                    |
//! |-------------------|---------------------------------------------------------------|------------------------------------------|
//! | **Backoff**       | Interval plans, cancellable waits, auto-reset.                | [`Schedule`], [`Interval`], [`Step`]     |
//! | **Capabilities**  | What a component must expose to be orchestrated.              | [`Start`], [`Stop`], [`StopSignal`]      |
//! | **Orchestration** | Concurrent group start, compensation, group stop.             | [`start_all`], [`start_all_or_compensate`], [`stop_all`] |
//! | **Errors**        | Typed configuration and start errors.                         | [`ConfigError`], [`StartError`]          |
//! | **Configuration** | Default stop grace and backoff plan.                          | [`Config`], [`Orchestrator`]             |
//!
//! ## Logging
//! The crate emits [`tracing`] events (`debug` for waits and resets, `warn` for
//! failed starts, `info` around compensation) and never installs a subscriber.
//!
//! ## Example
//! ```rust
//! use std::time::Duration;
//! use stagehand::{Schedule, Step};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut schedule = Schedule::new();
//!     schedule.add_interval(Duration::from_millis(30), Duration::from_millis(10))?;
//!
//!     let canceller = schedule.canceller();
//!     tokio::spawn(async move {
//!         tokio::time::sleep(Duration::from_millis(15)).await;
//!         canceller.cancel();
//!     });
//!
//!     let mut retries = 0;
//!     loop {
//!         match schedule.advance().await {
//!             Step::Continue => retries += 1,
//!             Step::Cancelled | Step::Exhausted => break,
//!         }
//!     }
//!     assert!(retries <= 3);
//!     Ok(())
//! }
//! ```
mod backoff;
mod config;
mod error;
pub mod lifecycle;
mod orchestrator;

// ---- Public re-exports ----

pub use backoff::{Canceller, Interval, Schedule, Step};
pub use config::{Config, PlanEntry};
pub use error::{ConfigError, StartError};
pub use lifecycle::{
    ComponentRef, Start, StartFailures, Stop, StopSignal, start_all, start_all_or_compensate,
    start_with_retry, stop_all,
};
pub use orchestrator::Orchestrator;
