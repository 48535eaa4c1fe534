//! Seams between the engine and its collaborators.
//!
//! The engine stays agnostic to how operations reach the backend, how they
//! are signed, and what their call input encodes. Concrete implementations
//! live outside this crate (`stampede-client`, `stampede-workloads`); tests
//! script their own.

use crate::error::{CatalogError, SignerError, TransportError};
use async_trait::async_trait;
use stampede_types::{
    Address, BlockHeight, Hash, OperationPayload, SignedOperation, StageKind,
};

/// Progress of a submitted operation as observed through the transport.
///
/// A terminal answer means the backend considers the operation final at the
/// current head — inclusion plus whatever finality threshold the backend
/// applies. The engine never re-implements finality on top of this.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollStatus {
    /// Not yet terminal. Keep polling.
    Pending,
    /// Executed successfully and final at this height.
    Confirmed(BlockHeight),
    /// Executed, effect rejected, final.
    Reverted(String),
}

/// Backend access used by the engine.
///
/// One implementation per backend flavor; the engine only ever holds a
/// `dyn Transport`.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Number of operations the backend has ever accepted from this
    /// address, pending included. Queried once per actor at campaign start
    /// to seed its nonce lane — never mid-campaign.
    async fn pending_operation_count(&self, address: &Address)
        -> Result<u64, TransportError>;

    /// Broadcast a signed operation. Returns the operation id the backend
    /// will know it by.
    async fn submit(&self, operation: &SignedOperation) -> Result<Hash, TransportError>;

    /// Check whether a submitted operation reached a terminal state.
    async fn poll_outcome(&self, id: &Hash) -> Result<PollStatus, TransportError>;

    /// Current chain head height.
    async fn current_height(&self) -> Result<BlockHeight, TransportError>;
}

/// Produces signed operations. The engine never sees key material.
pub trait Signer: Send + Sync {
    /// Sign a composed payload on behalf of an actor.
    fn sign(
        &self,
        actor: stampede_types::ActorId,
        payload: &OperationPayload,
    ) -> Result<SignedOperation, SignerError>;
}

/// Addresses of a resolved resource pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourcePairAddresses {
    /// First resource of the pair (the input side for swaps).
    pub base: Address,
    /// Second resource of the pair.
    pub quote: Address,
}

/// Everything a catalog may use when building one operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationContext {
    /// Address the operation acts for: the sender for workflow stages, the
    /// recipient for airdrops.
    pub actor: Address,
    /// Resolved resource pair, when the stage works on one.
    pub pair: Option<ResourcePairAddresses>,
}

/// Target, value, and call input for one operation, as built by a catalog.
/// The engine adds sender and nonce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallSpec {
    /// Target contract or recipient.
    pub target: Address,
    /// Native value attached to the call.
    pub value: u128,
    /// Encoded call input.
    pub input: Vec<u8>,
}

/// Builds operations per stage tag. Opaque to the engine: adding a workflow
/// stage means adding a catalog entry, not touching the scheduler, the
/// allocator, or the router.
pub trait WorkflowCatalog: Send + Sync {
    /// Build the call for `stage` in the given context.
    fn build(&self, stage: StageKind, ctx: &OperationContext)
        -> Result<CallSpec, CatalogError>;
}
