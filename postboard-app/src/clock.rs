//! Time source for polling
//!
//! The poller only ever needs to wait; tests swap in a clock that returns
//! immediately and counts how often it was asked to sleep.

use async_trait::async_trait;
use std::time::Duration;

/// Something that can suspend the current task for a while
#[async_trait]
pub trait Clock: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

/// Real time, via the tokio timer
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioClock;

#[async_trait]
impl Clock for TokioClock {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

#[cfg(test)]
pub(crate) use instant::InstantClock;
