//! Chunked batch submission.
//!
//! A stage's operation set is split into consecutive chunks of at most
//! the configured size. A chunk's operations are submitted concurrently
//! and every one is driven to a terminal outcome before the next chunk
//! starts. Chunks are never overlapped: a later chunk may depend on state
//! the current chunk's confirmed effects mutate, and per-actor nonce
//! order must hold across chunk boundaries.

use futures::future;
use stampede_types::{ActorId, Hash, Outcome, SignedOperation, StageKind, SubmitFailure};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::tracker::ConfirmationTracker;
use crate::traits::Transport;

/// A signed operation annotated with where it came from, ready to submit.
#[derive(Debug, Clone)]
pub struct PreparedOperation {
    /// Stage that composed the operation.
    pub stage: StageKind,
    /// Actor whose key signed it.
    pub actor: ActorId,
    /// The signed envelope.
    pub operation: SignedOperation,
}

/// Terminal result of one prepared operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationOutcome {
    /// Actor the operation was attributed to.
    pub actor: ActorId,
    /// Operation id (the submission handle, or the local envelope hash
    /// when the operation never reached the backend).
    pub id: Hash,
    /// How it ended.
    pub outcome: Outcome,
}

/// Drives one stage's operations through the transport in bounded chunks.
#[derive(Debug, Clone, Copy)]
pub struct BatchScheduler {
    chunk_size: usize,
}

impl BatchScheduler {
    pub fn new(chunk_size: usize) -> Self {
        debug_assert!(chunk_size > 0, "chunk size is validated by the config");
        Self { chunk_size }
    }

    /// Submit and confirm every operation, chunk by chunk.
    ///
    /// Every input operation gets exactly one outcome, in input order.
    /// A failed sibling never cancels the rest of its chunk; the caller
    /// decides what to do with the failures. After cancellation nothing
    /// further is submitted, and unsent operations are recorded as
    /// cancelled.
    pub async fn run_stage(
        &self,
        transport: &dyn Transport,
        tracker: &ConfirmationTracker,
        operations: Vec<PreparedOperation>,
        cancel: &CancellationToken,
    ) -> Vec<OperationOutcome> {
        let chunk_count = operations.len().div_ceil(self.chunk_size.max(1));
        let mut outcomes = Vec::with_capacity(operations.len());

        for (chunk_index, chunk) in operations.chunks(self.chunk_size).enumerate() {
            if cancel.is_cancelled() {
                outcomes.extend(chunk.iter().map(cancelled_outcome));
                continue;
            }

            debug!(
                chunk = chunk_index + 1,
                of = chunk_count,
                size = chunk.len(),
                "submitting chunk"
            );
            let submissions = chunk
                .iter()
                .map(|prepared| submit_and_track(transport, tracker, prepared, cancel));
            outcomes.extend(future::join_all(submissions).await);
        }

        outcomes
    }
}

/// Submit one operation and wait out its confirmation.
async fn submit_and_track(
    transport: &dyn Transport,
    tracker: &ConfirmationTracker,
    prepared: &PreparedOperation,
    cancel: &CancellationToken,
) -> OperationOutcome {
    if cancel.is_cancelled() {
        return cancelled_outcome(prepared);
    }

    match transport.submit(&prepared.operation).await {
        Ok(handle) => {
            let outcome = tracker.wait(transport, &handle, cancel).await;
            OperationOutcome {
                actor: prepared.actor,
                id: handle,
                outcome,
            }
        }
        Err(err) => {
            warn!(
                stage = %prepared.stage,
                actor = %prepared.actor,
                error = %err,
                "submission failed"
            );
            OperationOutcome {
                actor: prepared.actor,
                id: prepared.operation.id(),
                outcome: Outcome::SubmitFailed(SubmitFailure::Backend(err.to_string())),
            }
        }
    }
}

fn cancelled_outcome(prepared: &PreparedOperation) -> OperationOutcome {
    OperationOutcome {
        actor: prepared.actor,
        id: prepared.operation.id(),
        outcome: Outcome::SubmitFailed(SubmitFailure::Cancelled),
    }
}
