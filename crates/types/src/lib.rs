//! Core types shared across the stampede workspace.
//!
//! Everything here is plain data: hashes, addresses, identifiers, keypairs,
//! and the operation/outcome model the orchestration engine works in terms
//! of. No I/O, no async.

pub mod crypto;
pub mod hash;
pub mod identifiers;
pub mod operation;

pub use crypto::{KeyPair, PublicKey, Signature};
pub use hash::{Hash, HexError};
pub use identifiers::{ActorId, Address, BlockHeight, Nonce, ResourceId};
pub use operation::{
    CodecError, OperationPayload, Outcome, SignedOperation, StageKind, SubmitFailure,
};
