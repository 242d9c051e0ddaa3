//! Component lifecycle: start/stop capabilities and group orchestration.
//!
//! ## Contents
//! - [`Start`], [`Stop`] capabilities a component implements
//! - [`StopSignal`] broadcast one-shot "stopping finished" signal
//! - [`StartFailures`] failure-only report keyed by component identity
//! - [`start_all`], [`start_all_or_compensate`], [`stop_all`], [`start_with_retry`]
//!
//! See `group.rs` for the fan-out/fan-in flow.

mod component;
mod failures;
mod group;
mod signal;

pub use component::{ComponentRef, Start, Stop};
pub use failures::StartFailures;
pub use group::{start_all, start_all_or_compensate, start_with_retry, stop_all};
pub use signal::StopSignal;
