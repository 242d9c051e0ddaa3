//! # Start/stop capabilities.
//!
//! This module defines the two traits the orchestrator consumes:
//! - [`Stop`]: request a stop with a time budget, observe completion via [`StopSignal`];
//! - [`Start`]: a fallible async start (requires [`Stop`] so failed groups can be unwound).
//!
//! The common handle type is [`ComponentRef`], an `Arc<dyn Start>` suitable for
//! sharing with the orchestrator's spawned tasks.
//!
//! # Example
//! ```
//! use std::sync::atomic::{AtomicBool, Ordering};
//! use std::time::Duration;
//! use async_trait::async_trait;
//! use stagehand::{Start, StartError, Stop, StopSignal};
//!
//! #[derive(Default)]
//! struct Cache {
//!     warm: AtomicBool,
//! }
//!
//! impl Stop for Cache {
//!     fn stop(&self, _grace: Duration) {
//!         self.warm.store(false, Ordering::SeqCst);
//!     }
//!
//!     fn stopped(&self) -> StopSignal {
//!         StopSignal::completed()
//!     }
//! }
//!
//! #[async_trait]
//! impl Start for Cache {
//!     fn name(&self) -> &str { "cache" }
//!
//!     async fn start(&self) -> Result<(), StartError> {
//!         self.warm.store(true, Ordering::SeqCst);
//!         Ok(())
//!     }
//! }
//! ```

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use super::StopSignal;
use crate::error::StartError;

/// Shared handle to a startable component.
pub type ComponentRef = Arc<dyn Start>;

/// # Something that must be torn down.
///
/// `stop` only *requests* the stop and returns at once; completion is
/// observed through the signal returned by [`Stop::stopped`], which must
/// fire exactly once and must be the same signal for every call.
pub trait Stop: Send + Sync + 'static {
    /// Begins stopping, allowing at most `grace` for teardown.
    fn stop(&self, grace: Duration);

    /// Signal that fires once stopping has fully completed.
    fn stopped(&self) -> StopSignal;
}

/// # Something that must be started before use.
#[async_trait]
pub trait Start: Stop {
    /// Returns a human-readable name used in logs.
    ///
    /// The default uses `type_name::<Self>()`, which can be verbose - override it when possible.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Starts the component. Called once per orchestration call.
    async fn start(&self) -> Result<(), StartError>;
}
