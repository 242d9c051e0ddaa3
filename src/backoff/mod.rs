//! Interval-based backoff scheduling.
//!
//! This module groups the pieces a retry loop needs to pace itself:
//!
//! ## Contents
//! - [`Interval`] one `(span, wait)` phase, validated on construction
//! - [`Schedule`] the ordered phases plus cursor, with cancellation and auto-reset
//! - [`Canceller`] fire-and-forget interrupt for a schedule's in-flight wait
//! - [`Step`] outcome of one `advance` (continue / cancelled / exhausted)
//!
//! ## Quick wiring
//! ```text
//! loop {
//!     match try_the_thing().await {
//!         Ok(_)  => { schedule.reset(); break }
//!         Err(_) => if schedule.advance().await.should_stop() { break }
//!     }
//! }
//! ```

mod interval;
mod schedule;
mod step;

pub use interval::Interval;
pub use schedule::{Canceller, Schedule};
pub use step::Step;
