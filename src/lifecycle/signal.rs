//! # One-shot, broadcast stop-completion signal.
//!
//! A [`StopSignal`] fires exactly once, when a component has finished
//! stopping. Any number of clones may wait on it; waiting never consumes the
//! signal, and waiting after it fired returns immediately.
//!
//! ## Patterns
//! ```text
//! stop and forget:        c.stop(grace);
//! stop and wait:          c.stop(grace); c.stopped().wait().await;
//! stop, work, then wait:  let s = c.stopped(); c.stop(grace); /* ... */ s.wait().await;
//! stop with a deadline:   c.stop(grace); c.stopped().wait_timeout(d).await
//! ```
//!
//! Components with no teardown work return [`StopSignal::completed`].
//!
//! # Example
//! ```rust
//! use stagehand::StopSignal;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let signal = StopSignal::new();
//! let observer = signal.clone();
//!
//! tokio::spawn(async move {
//!     // tear stuff down...
//!     signal.complete();
//! });
//!
//! observer.wait().await;
//! assert!(observer.is_complete());
//! # }
//! ```

use std::time::Duration;

use tokio::time;
use tokio_util::sync::CancellationToken;

/// Broadcast completion signal for a stopping component.
///
/// Cloning is cheap; all clones observe the same completion.
#[derive(Clone, Debug, Default)]
pub struct StopSignal {
    done: CancellationToken,
}

impl StopSignal {
    /// Creates a signal that has not fired yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a signal that has already fired.
    pub fn completed() -> Self {
        let signal = Self::new();
        signal.complete();
        signal
    }

    /// Fires the signal. Calling it again has no effect.
    pub fn complete(&self) {
        self.done.cancel();
    }

    /// `true` once the signal has fired.
    pub fn is_complete(&self) -> bool {
        self.done.is_cancelled()
    }

    /// Waits until the signal fires.
    pub async fn wait(&self) {
        self.done.cancelled().await;
    }

    /// Waits up to `timeout`; returns `true` if the signal fired in time.
    pub async fn wait_timeout(&self, timeout: Duration) -> bool {
        time::timeout(timeout, self.wait()).await.is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_completed_signal_is_ready() {
        let signal = StopSignal::completed();
        assert!(signal.is_complete());
        signal.wait().await;
        signal.wait().await;
    }

    #[tokio::test]
    async fn test_every_observer_sees_completion() {
        let signal = StopSignal::new();
        let waiters: Vec<_> = (0..3)
            .map(|_| {
                let s = signal.clone();
                tokio::spawn(async move { s.wait().await })
            })
            .collect();

        assert!(!signal.is_complete());
        signal.complete();
        signal.complete();

        for w in waiters {
            w.await.unwrap();
        }
        assert!(signal.is_complete());
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_timeout() {
        let signal = StopSignal::new();
        assert!(!signal.wait_timeout(Duration::from_millis(50)).await);

        let s = signal.clone();
        tokio::spawn(async move {
            time::sleep(Duration::from_millis(10)).await;
            s.complete();
        });
        assert!(signal.wait_timeout(Duration::from_secs(1)).await);
    }
}
