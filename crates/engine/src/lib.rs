//! Transaction orchestration engine.
//!
//! Drives staged, high-concurrency operation batches against a
//! blockchain-style backend to benchmark throughput and contention
//! handling:
//!
//! - `NonceAllocator`: per-actor sequence lanes, seeded from the backend
//!   once and advanced purely in memory
//! - `ConflictRouter`: deterministic mapping of logical indices to
//!   (actor, resource pair), with configurable hot-slot remapping
//! - `StageSequencer`: dependency-ordered workflow stage tables
//! - `BatchScheduler`: bounded chunks, concurrent within a chunk, strictly
//!   serial across chunks
//! - `ConfirmationTracker`: polls submissions to a terminal outcome under
//!   a timeout
//! - `Campaign`: composes the above into one run and produces a `Report`
//!
//! All I/O goes through the `Transport`, `Signer`, and `WorkflowCatalog`
//! traits; the engine never talks to a backend directly.

mod campaign;
mod config;
mod error;
mod nonce;
mod registry;
mod report;
mod router;
mod scheduler;
mod stage;
mod tracker;
mod traits;

pub use campaign::Campaign;
pub use config::{CampaignConfig, Workflow};
pub use error::{
    CampaignError, CatalogError, ConfigError, NonceError, SequenceError, SignerError,
    TransportError,
};
pub use nonce::{NonceAllocator, NonceInit};
pub use registry::{ActorRecord, ActorRegistry, ResourceRegistry};
pub use report::{FailureRecord, HeightSpan, Report, StageReport, StageTally};
pub use router::{ConflictPolicy, ConflictRouter, Route};
pub use scheduler::{BatchScheduler, OperationOutcome, PreparedOperation};
pub use stage::{Dependency, RoutingMode, StageDescriptor, StageSequencer};
pub use tracker::{ConfirmationTracker, LatencySummary};
pub use traits::{
    CallSpec, OperationContext, PollStatus, ResourcePairAddresses, Signer, Transport,
    WorkflowCatalog,
};
