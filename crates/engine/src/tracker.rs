//! Confirmation tracking for submitted operations.
//!
//! One poll loop per in-flight operation: ask the backend for the
//! operation's status until it turns terminal, the stage timeout lapses,
//! or the campaign is cancelled. The tracker never retries a submission;
//! a timed-out operation is abandoned and recorded as failed.

use std::time::{Duration, Instant};

use hdrhistogram::Histogram;
use stampede_types::{Hash, Outcome, SubmitFailure};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::traits::{PollStatus, Transport};

/// Waits on submitted operations and classifies their outcomes.
///
/// Confirmation latencies are folded into a shared histogram; the lock is
/// held only for the record itself.
pub struct ConfirmationTracker {
    poll_interval: Duration,
    timeout: Duration,
    latency: parking_lot::Mutex<Histogram<u64>>,
}

impl ConfirmationTracker {
    pub fn new(poll_interval: Duration, timeout: Duration) -> Self {
        Self {
            poll_interval,
            timeout,
            latency: parking_lot::Mutex::new(
                Histogram::new(3).expect("histogram creation should succeed"),
            ),
        }
    }

    /// Poll until the operation is terminal, the timeout lapses, or the
    /// campaign is cancelled.
    ///
    /// A failed poll reads as still-pending: transient backend hiccups
    /// should not fail an operation the backend may well have included.
    /// The timeout bounds how long that grace can last.
    pub async fn wait(
        &self,
        transport: &dyn Transport,
        id: &Hash,
        cancel: &CancellationToken,
    ) -> Outcome {
        let submitted = Instant::now();
        let deadline = submitted + self.timeout;

        loop {
            if cancel.is_cancelled() {
                return Outcome::SubmitFailed(SubmitFailure::Cancelled);
            }

            match transport.poll_outcome(id).await {
                Ok(PollStatus::Confirmed(height)) => {
                    self.record_latency(submitted.elapsed());
                    return Outcome::Confirmed(height);
                }
                Ok(PollStatus::Reverted(reason)) => return Outcome::Reverted(reason),
                Ok(PollStatus::Pending) => {}
                Err(err) => {
                    debug!(operation = %id, error = %err, "outcome poll failed");
                }
            }

            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return Outcome::SubmitFailed(SubmitFailure::Timeout);
            }

            tokio::select! {
                _ = cancel.cancelled() => {
                    return Outcome::SubmitFailed(SubmitFailure::Cancelled);
                }
                _ = tokio::time::sleep(self.poll_interval.min(remaining)) => {}
            }
        }
    }

    fn record_latency(&self, elapsed: Duration) {
        let micros = elapsed.as_micros().min(u128::from(u64::MAX)) as u64;
        let mut hist = self.latency.lock();
        let _ = hist.record(micros);
    }

    /// Snapshot of confirmation latencies, if any were recorded.
    pub fn latency_summary(&self) -> Option<LatencySummary> {
        let hist = self.latency.lock();
        if hist.is_empty() {
            return None;
        }
        Some(LatencySummary {
            samples: hist.len(),
            p50: Duration::from_micros(hist.value_at_quantile(0.50)),
            p90: Duration::from_micros(hist.value_at_quantile(0.90)),
            p99: Duration::from_micros(hist.value_at_quantile(0.99)),
            max: Duration::from_micros(hist.max()),
            mean: Duration::from_micros(hist.mean() as u64),
        })
    }
}

/// Percentile summary of confirmation latency.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LatencySummary {
    pub samples: u64,
    pub p50: Duration,
    pub p90: Duration,
    pub p99: Duration,
    pub max: Duration,
    pub mean: Duration,
}
