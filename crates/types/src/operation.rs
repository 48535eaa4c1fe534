//! Operations, outcomes, and the signed wire envelope.
//!
//! An operation is one nonce-carrying unit of work. The orchestration
//! engine composes payloads, an external signer wraps them into
//! [`SignedOperation`]s, and the transport ships the fixed binary envelope
//! produced by [`SignedOperation::to_bytes`]. The envelope hash is the
//! operation's identity on the backend.

use crate::crypto::{PublicKey, Signature};
use crate::hash::Hash;
use crate::identifiers::{Address, BlockHeight, Nonce};
use std::fmt;

/// Domain tag prepended to the operation signing message.
///
/// Format: `operation_v1:` || from || target || nonce || value || input
pub const DOMAIN_OPERATION: &[u8] = b"operation_v1:";

/// Named step of a workflow. Tags key the workflow catalog; the engine
/// never interprets them beyond identity and ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StageKind {
    /// Mint the first token of each actor's pair.
    MintA,
    /// Mint the second token of each actor's pair.
    MintB,
    /// Approve the AMM router on the first token.
    ApproveA,
    /// Approve the AMM router on the second token.
    ApproveB,
    /// Provide liquidity for each actor's token pair.
    ProvideLiquidity,
    /// Mint + approve the balances conflict remapping will need.
    PrepareHotPath,
    /// Swap through each resolved pool.
    Swap,
    /// Native transfer from the funder to each actor.
    Airdrop,
}

impl StageKind {
    /// Stable lowercase name, used in logs and reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            StageKind::MintA => "mint-a",
            StageKind::MintB => "mint-b",
            StageKind::ApproveA => "approve-a",
            StageKind::ApproveB => "approve-b",
            StageKind::ProvideLiquidity => "provide-liquidity",
            StageKind::PrepareHotPath => "prepare-hot-path",
            StageKind::Swap => "swap",
            StageKind::Airdrop => "airdrop",
        }
    }
}

impl fmt::Display for StageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The unsigned content of an operation: who sends, what it targets, the
/// assigned nonce, attached native value, and opaque call input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationPayload {
    /// Sender address.
    pub from: Address,
    /// Target contract or recipient address.
    pub target: Address,
    /// Per-sender sequence number.
    pub nonce: Nonce,
    /// Native value attached to the call.
    pub value: u128,
    /// Encoded call input; empty for plain transfers.
    pub input: Vec<u8>,
}

impl OperationPayload {
    /// Build the domain-separated signing message for this payload.
    pub fn signing_message(&self) -> Vec<u8> {
        let mut message =
            Vec::with_capacity(DOMAIN_OPERATION.len() + 64 + self.input.len());
        message.extend_from_slice(DOMAIN_OPERATION);
        message.extend_from_slice(self.from.as_bytes());
        message.extend_from_slice(self.target.as_bytes());
        message.extend_from_slice(&self.nonce.0.to_le_bytes());
        message.extend_from_slice(&self.value.to_le_bytes());
        message.extend_from_slice(&self.input);
        message
    }
}

/// A signed operation ready for submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedOperation {
    /// The signed content.
    pub payload: OperationPayload,
    /// Sender public key.
    pub public_key: PublicKey,
    /// Ed25519 signature over [`OperationPayload::signing_message`].
    pub signature: Signature,
}

/// Fixed bytes before the variable-length input in the wire envelope:
/// from(20) + target(20) + nonce(8) + value(16) + input_len(4).
const ENVELOPE_HEAD: usize = 68;
/// Trailing bytes after the input: public key(32) + signature(64).
const ENVELOPE_TAIL: usize = 96;

impl SignedOperation {
    /// Encode to the wire envelope.
    ///
    /// Layout: `from || target || nonce_le || value_le || input_len_le ||
    /// input || public_key || signature`. Deterministic; the Blake3 hash of
    /// this encoding is the operation id.
    pub fn to_bytes(&self) -> Vec<u8> {
        let p = &self.payload;
        let mut bytes = Vec::with_capacity(ENVELOPE_HEAD + p.input.len() + ENVELOPE_TAIL);
        bytes.extend_from_slice(p.from.as_bytes());
        bytes.extend_from_slice(p.target.as_bytes());
        bytes.extend_from_slice(&p.nonce.0.to_le_bytes());
        bytes.extend_from_slice(&p.value.to_le_bytes());
        bytes.extend_from_slice(&(p.input.len() as u32).to_le_bytes());
        bytes.extend_from_slice(&p.input);
        bytes.extend_from_slice(self.public_key.as_bytes());
        bytes.extend_from_slice(self.signature.as_bytes());
        bytes
    }

    /// Decode from the wire envelope.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CodecError> {
        if bytes.len() < ENVELOPE_HEAD + ENVELOPE_TAIL {
            return Err(CodecError::TooShort {
                expected: ENVELOPE_HEAD + ENVELOPE_TAIL,
                actual: bytes.len(),
            });
        }

        let from = Address::from_bytes(&bytes[0..20]);
        let target = Address::from_bytes(&bytes[20..40]);

        let mut nonce_bytes = [0u8; 8];
        nonce_bytes.copy_from_slice(&bytes[40..48]);
        let nonce = Nonce(u64::from_le_bytes(nonce_bytes));

        let mut value_bytes = [0u8; 16];
        value_bytes.copy_from_slice(&bytes[48..64]);
        let value = u128::from_le_bytes(value_bytes);

        let mut len_bytes = [0u8; 4];
        len_bytes.copy_from_slice(&bytes[64..68]);
        let input_len = u32::from_le_bytes(len_bytes) as usize;

        let remaining = bytes.len() - ENVELOPE_HEAD - ENVELOPE_TAIL;
        if remaining != input_len {
            return Err(CodecError::LengthMismatch {
                declared: input_len,
                remaining,
            });
        }

        let input = bytes[ENVELOPE_HEAD..ENVELOPE_HEAD + input_len].to_vec();

        let mut pk = [0u8; 32];
        pk.copy_from_slice(&bytes[ENVELOPE_HEAD + input_len..ENVELOPE_HEAD + input_len + 32]);
        let mut sig = [0u8; 64];
        sig.copy_from_slice(&bytes[ENVELOPE_HEAD + input_len + 32..]);

        Ok(SignedOperation {
            payload: OperationPayload {
                from,
                target,
                nonce,
                value,
                input,
            },
            public_key: PublicKey(pk),
            signature: Signature(sig),
        })
    }

    /// Operation identity: Blake3 hash of the wire envelope.
    pub fn id(&self) -> Hash {
        Hash::from_bytes(&self.to_bytes())
    }

    /// Check the signature and that the sender address matches the key.
    pub fn verify(&self) -> bool {
        self.payload.from == Address::from_public_key(&self.public_key)
            && self
                .public_key
                .verify(&self.payload.signing_message(), &self.signature)
    }
}

/// Errors decoding a wire envelope.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    /// Envelope shorter than the fixed layout allows.
    #[error("Operation envelope too short: need at least {expected} bytes, got {actual}")]
    TooShort {
        /// Minimum byte count for a valid envelope.
        expected: usize,
        /// Bytes received.
        actual: usize,
    },

    /// Declared input length disagrees with the envelope size.
    #[error("Operation envelope length mismatch: declared input {declared}, remaining {remaining}")]
    LengthMismatch {
        /// Input length from the envelope header.
        declared: usize,
        /// Bytes actually present between head and tail.
        remaining: usize,
    },
}

/// Terminal result of a submitted operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Executed successfully; included at this height.
    Confirmed(BlockHeight),
    /// Executed but the backend rejected its effect. Never auto-retried: a
    /// revert burned its nonce, and re-deriving one mid-campaign races with
    /// in-flight submissions.
    Reverted(String),
    /// Never reached terminal execution.
    SubmitFailed(SubmitFailure),
}

impl Outcome {
    /// True for `Confirmed`.
    pub fn is_confirmed(&self) -> bool {
        matches!(self, Outcome::Confirmed(_))
    }

    /// True for `Reverted`.
    pub fn is_reverted(&self) -> bool {
        matches!(self, Outcome::Reverted(_))
    }

    /// True for `SubmitFailed`.
    pub fn is_submit_failed(&self) -> bool {
        matches!(self, Outcome::SubmitFailed(_))
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Confirmed(height) => write!(f, "confirmed at {height}"),
            Outcome::Reverted(reason) => write!(f, "reverted: {reason}"),
            Outcome::SubmitFailed(failure) => write!(f, "submit failed: {failure}"),
        }
    }
}

/// Why an operation never confirmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitFailure {
    /// Transport or backend rejected the submission.
    Backend(String),
    /// No terminal state observed within the stage timeout.
    Timeout,
    /// Campaign was cancelled before or while awaiting this operation.
    Cancelled,
}

impl fmt::Display for SubmitFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubmitFailure::Backend(detail) => write!(f, "backend: {detail}"),
            SubmitFailure::Timeout => write!(f, "timeout"),
            SubmitFailure::Cancelled => write!(f, "cancelled"),
        }
    }
}
