//! Types for RPC communication with a node.

use serde::{Deserialize, Serialize};
use stampede_engine::PollStatus;
use stampede_types::BlockHeight;

/// Request to submit a signed operation.
#[derive(Debug, Serialize)]
pub struct SubmitOperationRequest {
    pub operation_hex: String,
}

/// Response from operation submission.
#[derive(Debug, Deserialize)]
pub struct SubmitOperationResponse {
    pub accepted: bool,
    pub id: String,
    pub error: Option<String>,
}

/// Response from the per-account pending count endpoint.
#[derive(Debug, Deserialize)]
pub struct PendingCountResponse {
    pub address: String,
    pub pending: u64,
}

/// Response from the operation status endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct OperationStatusResponse {
    /// Operation id (hex-encoded).
    pub id: String,
    /// Current status of the operation.
    /// Possible values: "pending", "confirmed", "reverted", "unknown"
    pub status: String,
    /// Block height of inclusion (if confirmed).
    #[serde(default)]
    pub height: Option<u64>,
    /// Execution failure reason (if reverted).
    #[serde(default)]
    pub revert_reason: Option<String>,
}

impl OperationStatusResponse {
    /// Convert to a typed poll status if possible.
    ///
    /// Returns None for unrecognized status strings. "unknown" maps to
    /// pending: nodes answer that for operations not yet in their index.
    pub fn to_poll_status(&self) -> Option<PollStatus> {
        match self.status.as_str() {
            "pending" | "unknown" => Some(PollStatus::Pending),
            "confirmed" => Some(PollStatus::Confirmed(BlockHeight(self.height?))),
            "reverted" => Some(PollStatus::Reverted(
                self.revert_reason.clone().unwrap_or_default(),
            )),
            _ => None,
        }
    }

    /// Check if the operation has reached a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self.status.as_str(), "confirmed" | "reverted")
    }
}

/// Response from node status endpoint.
#[derive(Debug, Deserialize)]
pub struct NodeStatusResponse {
    pub block_height: u64,
    #[serde(default)]
    pub connected_peers: usize,
    #[serde(default)]
    pub uptime_secs: u64,
    #[serde(default)]
    pub version: String,
}

/// Simplified node status.
#[derive(Debug)]
pub struct NodeStatus {
    pub block_height: BlockHeight,
    pub connected_peers: usize,
}
