//! Bounded polling for asynchronous page state.
//!
//! Web UIs mutate the DOM after interactions with no readiness signal the
//! harness can subscribe to. Polling with a bounded timeout avoids both the
//! flakiness of a fixed short sleep and the hang of an unbounded wait.

use std::future::Future;
use std::time::{Duration, Instant};

use crate::config::HarnessConfig;
use crate::error::HarnessError;

#[derive(Debug, Clone, Copy)]
pub struct WaitStrategy {
    pub timeout: Duration,
    pub poll_interval: Duration,
}

impl WaitStrategy {
    pub fn new(timeout: Duration, poll_interval: Duration) -> Self {
        Self {
            timeout,
            poll_interval,
        }
    }

    pub fn from_config(config: &HarnessConfig) -> Self {
        Self::new(config.wait_timeout, config.poll_interval)
    }

    /// Poll until the predicate holds. Hard wait: expiry raises `Timeout`
    /// naming `what` was awaited. The predicate is probed at least once, and
    /// a scenario that settles faster returns immediately.
    pub async fn until<F, Fut>(&self, what: &str, mut probe: F) -> Result<(), HarnessError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<bool, HarnessError>>,
    {
        if self.settled(&mut probe).await? {
            return Ok(());
        }
        Err(HarnessError::Timeout {
            what: what.to_string(),
            timeout_ms: self.timeout.as_millis() as u64,
        })
    }

    /// Tolerant poll: `Ok(false)` on expiry instead of an error. Used for
    /// conditions the scenario asserts explicitly afterwards, so a
    /// slow-but-wrong SUT fails on the post-condition rather than on the
    /// wait itself.
    pub async fn settled<F, Fut>(&self, mut probe: F) -> Result<bool, HarnessError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<bool, HarnessError>>,
    {
        let start = Instant::now();
        loop {
            if probe().await? {
                return Ok(true);
            }
            if start.elapsed() >= self.timeout {
                return Ok(false);
            }
            tokio::time::sleep(self.poll_interval).await;
        }
    }
}

/// Fixed settle delay, only for actions with observable side effects but no
/// observable completion signal (e.g. client-side validation blocking a
/// navigation that therefore never happens).
pub async fn grace(delay: Duration) {
    tokio::time::sleep(delay).await;
}
