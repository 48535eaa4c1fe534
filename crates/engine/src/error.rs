//! Error types for the orchestration engine.
//!
//! The taxonomy separates fatal pre-network rejection (`ConfigError`) from
//! actor- and operation-scoped failures (`TransportError`, which the
//! campaign absorbs by dropping actors or recording failed outcomes) and
//! from wiring faults (`SignerError`, `CatalogError`) that abort a run.

use stampede_types::{ActorId, StageKind};
use thiserror::Error;

/// Invalid campaign configuration. Rejected before any network interaction.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// Actor count must be positive.
    #[error("Actor count must be positive")]
    ZeroActors,

    /// Chunk size must be positive.
    #[error("Chunk size must be positive")]
    ZeroChunkSize,

    /// Stage timeout must be positive.
    #[error("Stage timeout must be positive")]
    ZeroTimeout,

    /// Poll interval must be positive.
    #[error("Poll interval must be positive")]
    ZeroPollInterval,

    /// Conflict rate outside [0, 1] or not finite.
    #[error("Conflict rate must be a finite value in [0, 1], got {0}")]
    InvalidConflictRate(f64),

    /// Actor registry does not match the configured actor count.
    #[error("Configured {configured} actors but the registry holds {registered}")]
    ActorCountMismatch {
        /// Count from the configuration.
        configured: usize,
        /// Count in the registry handed to the campaign.
        registered: usize,
    },

    /// Not enough resource pairs for the default 1:1 topology.
    #[error("Workflow needs {needed} resource pairs but the registry holds {available}")]
    InsufficientResources {
        /// Pairs required (one per actor).
        needed: usize,
        /// Pairs available in the registry.
        available: usize,
    },
}

/// Transport-level failure. Scoped to the actor or operation it occurred
/// for; never fatal to the campaign as a whole.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Backend could not be reached.
    #[error("Backend unavailable: {0}")]
    Unavailable(String),

    /// Backend answered but refused the request.
    #[error("Backend rejected the request: {0}")]
    Rejected(String),

    /// Backend answered with something undecodable.
    #[error("Malformed backend response: {0}")]
    Malformed(String),
}

/// Signing failure for a composed operation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SignerError {
    /// The keyring holds no key for this actor.
    #[error("No signing key for {0}")]
    UnknownActor(ActorId),
}

/// Workflow catalog failure while building an operation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CatalogError {
    /// The catalog has no builder for this stage tag.
    #[error("Stage {0} is not part of this catalog")]
    UnsupportedStage(StageKind),

    /// The stage needs a resolved resource pair but none was supplied.
    #[error("Stage {0} requires a resource pair")]
    MissingResources(StageKind),
}

/// Stage table validation failure.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SequenceError {
    /// A stage appears twice in the table.
    #[error("Stage {0} appears more than once")]
    DuplicateStage(StageKind),

    /// A stage names a dependency that is not in the table.
    #[error("Stage {stage} depends on {dependency}, which is not in the table")]
    UnknownDependency {
        /// Stage carrying the dependency tag.
        stage: StageKind,
        /// The missing dependency.
        dependency: StageKind,
    },

    /// Dependencies loop back on themselves.
    #[error("Stage dependencies form a cycle through {0}")]
    CycleDetected(StageKind),
}

/// Per-actor nonce lane errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NonceError {
    /// The allocator has no lane for this actor.
    #[error("No nonce lane for {0}")]
    UnknownActor(ActorId),

    /// The lane exists but was never seeded (baseline query failed or was
    /// never run).
    #[error("Nonce lane for {0} is not initialized")]
    Uninitialized(ActorId),
}

/// Fatal campaign errors. Per-operation and per-actor failures are not
/// errors at this level — they surface as outcomes in the report.
#[derive(Debug, Error)]
pub enum CampaignError {
    /// Configuration rejected.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The stage table for the selected workflow failed validation.
    #[error(transparent)]
    Sequence(#[from] SequenceError),

    /// The fund workflow was selected but the registry has no funder.
    #[error("Fund workflow requires a funder account in the registry")]
    MissingFunder,

    /// The funder's nonce baseline could not be established.
    #[error("Funder nonce initialization failed; cannot run the fund workflow")]
    FunderUnavailable,

    /// Every actor failed nonce initialization; the backend is unreachable.
    #[error("No actor completed nonce initialization")]
    NoUsableActors,

    /// The catalog could not build an operation for a stage it should support.
    #[error("Workflow catalog failed for stage {stage}: {source}")]
    Catalog {
        /// Stage being composed.
        stage: StageKind,
        /// Underlying catalog error.
        #[source]
        source: CatalogError,
    },

    /// Signing failed for a composed operation.
    #[error("Signing failed for {actor}: {source}")]
    Signer {
        /// Actor whose key was requested.
        actor: ActorId,
        /// Underlying signer error.
        #[source]
        source: SignerError,
    },

    /// A nonce was requested for an actor without a usable lane.
    #[error(transparent)]
    Nonce(#[from] NonceError),
}
