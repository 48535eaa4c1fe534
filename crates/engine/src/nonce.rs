//! Per-actor nonce lanes.
//!
//! Each lane is seeded exactly once from the backend's pending-operation
//! count, then advances purely in memory. The backend is never consulted
//! again during the campaign, so allocation stays off the hot path.

use futures::future;
use stampede_types::{ActorId, Nonce};
use tracing::warn;

use crate::error::NonceError;
use crate::registry::ActorRegistry;
use crate::traits::Transport;

/// In-memory nonce lanes, one per registered actor (funder included).
#[derive(Debug)]
pub struct NonceAllocator {
    lanes: Vec<Option<Nonce>>,
}

/// Result of seeding the lanes: the allocator plus the actors whose
/// baseline query failed. Those actors hold no lane and sit out the
/// campaign.
#[derive(Debug)]
pub struct NonceInit {
    pub allocator: NonceAllocator,
    pub dropped: Vec<ActorId>,
}

impl NonceAllocator {
    /// Seed every lane concurrently from the backend.
    ///
    /// One query per actor, fanned out together. A failed query drops
    /// that actor rather than failing the whole campaign.
    pub async fn initialize(transport: &dyn Transport, registry: &ActorRegistry) -> NonceInit {
        let queries = registry.all_records().map(|record| async move {
            let result = transport.pending_operation_count(&record.address).await;
            (record.id, result)
        });
        let results = future::join_all(queries).await;

        let mut lanes = vec![None; registry.lane_count()];
        let mut dropped = Vec::new();
        for (id, result) in results {
            match result {
                Ok(count) => lanes[id.index()] = Some(Nonce(count)),
                Err(err) => {
                    warn!(actor = %id, error = %err, "nonce baseline query failed, dropping actor");
                    dropped.push(id);
                }
            }
        }

        NonceInit {
            allocator: Self { lanes },
            dropped,
        }
    }

    /// Hand out the actor's next nonce and advance the lane.
    pub fn next(&mut self, id: ActorId) -> Result<Nonce, NonceError> {
        let lane = self
            .lanes
            .get_mut(id.index())
            .ok_or(NonceError::UnknownActor(id))?;
        let nonce = lane.ok_or(NonceError::Uninitialized(id))?;
        *lane = Some(nonce.next());
        Ok(nonce)
    }

    /// Whether the actor's lane was seeded.
    pub fn is_initialized(&self, id: ActorId) -> bool {
        matches!(self.lanes.get(id.index()), Some(Some(_)))
    }
}
