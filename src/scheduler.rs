//! Deferred execution of the computer's move.

use async_trait::async_trait;
use std::time::Duration;

/// Waits before the controller continues with a deferred step.
///
/// The wait must not block the thread; the real implementation yields to
/// the tokio runtime.
#[async_trait]
pub trait Scheduler: Send + Sync {
    /// Completes once `delay` has passed.
    async fn delay(&self, delay: Duration);
}

/// Sleeps on the tokio timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioScheduler;

#[async_trait]
impl Scheduler for TokioScheduler {
    async fn delay(&self, delay: Duration) {
        tokio::time::sleep(delay).await;
    }
}

/// Completes immediately, for tests and headless play.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImmediateScheduler;

#[async_trait]
impl Scheduler for ImmediateScheduler {
    async fn delay(&self, _delay: Duration) {}
}
