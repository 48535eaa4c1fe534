//! HTTP transport over a node's RPC surface.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use stampede_engine::{PollStatus, Transport, TransportError};
use stampede_types::{Address, BlockHeight, Hash, SignedOperation};
use tracing::{debug, warn};

use crate::types::{
    NodeStatus, NodeStatusResponse, OperationStatusResponse, PendingCountResponse,
    SubmitOperationRequest, SubmitOperationResponse,
};

/// HTTP client for a single node endpoint.
///
/// Paths served by the node:
/// - `POST /v1/operations` submits a signed operation envelope
/// - `GET /v1/operations/{id}/status` reports an operation's status
/// - `GET /v1/accounts/{address}/pending-count` reports pending operations
/// - `GET /v1/status` reports node status
pub struct HttpTransport {
    base_url: String,
    client: reqwest::Client,
}

impl HttpTransport {
    /// Create a transport for the given base URL, e.g. `http://127.0.0.1:3000`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: normalize(base_url),
            client: reqwest::Client::new(),
        }
    }

    /// Create a transport with a per-request timeout.
    pub fn with_request_timeout(
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TransportError::Unavailable(e.to_string()))?;
        Ok(Self {
            base_url: normalize(base_url),
            client,
        })
    }

    /// The endpoint this transport talks to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch the node's status.
    pub async fn status(&self) -> Result<NodeStatus, TransportError> {
        let response: NodeStatusResponse =
            self.get_json(format!("{}/v1/status", self.base_url)).await?;
        Ok(NodeStatus {
            block_height: BlockHeight(response.block_height),
            connected_peers: response.connected_peers,
        })
    }

    /// Poll the status endpoint until the node answers, for up to `deadline`.
    pub async fn wait_for_ready(&self, deadline: Duration) -> Result<NodeStatus, TransportError> {
        let started = Instant::now();
        loop {
            match self.status().await {
                Ok(status) => return Ok(status),
                Err(err) if started.elapsed() >= deadline => return Err(err),
                Err(err) => {
                    debug!(endpoint = %self.base_url, error = %err, "node not ready yet");
                    tokio::time::sleep(Duration::from_millis(500)).await;
                }
            }
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, url: String) -> Result<T, TransportError> {
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| TransportError::Unavailable(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(TransportError::Unavailable(format!(
                "HTTP {status}: {body}"
            )));
        }

        response
            .json()
            .await
            .map_err(|e| TransportError::Malformed(e.to_string()))
    }
}

fn normalize(base_url: impl Into<String>) -> String {
    base_url.into().trim_end_matches('/').to_string()
}

#[async_trait]
impl Transport for HttpTransport {
    async fn pending_operation_count(&self, address: &Address) -> Result<u64, TransportError> {
        let url = format!(
            "{}/v1/accounts/{}/pending-count",
            self.base_url,
            address.to_hex()
        );
        let response: PendingCountResponse = self.get_json(url).await?;
        Ok(response.pending)
    }

    async fn submit(&self, operation: &SignedOperation) -> Result<Hash, TransportError> {
        let request = SubmitOperationRequest {
            operation_hex: hex::encode(operation.to_bytes()),
        };

        let response = self
            .client
            .post(format!("{}/v1/operations", self.base_url))
            .json(&request)
            .send()
            .await
            .map_err(|e| TransportError::Unavailable(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            warn!(endpoint = %self.base_url, status = %status, "submission rejected");
            return Err(TransportError::Rejected(format!("HTTP {status}: {body}")));
        }

        let body: SubmitOperationResponse = response
            .json()
            .await
            .map_err(|e| TransportError::Malformed(e.to_string()))?;

        if !body.accepted {
            return Err(TransportError::Rejected(body.error.unwrap_or_default()));
        }
        Hash::from_hex(&body.id).map_err(|e| TransportError::Malformed(e.to_string()))
    }

    async fn poll_outcome(&self, id: &Hash) -> Result<PollStatus, TransportError> {
        let url = format!("{}/v1/operations/{}/status", self.base_url, id.to_hex());
        let response: OperationStatusResponse = self.get_json(url).await?;
        response.to_poll_status().ok_or_else(|| {
            TransportError::Malformed(format!("unrecognized status \"{}\"", response.status))
        })
    }

    async fn current_height(&self) -> Result<BlockHeight, TransportError> {
        Ok(self.status().await?.block_height)
    }
}
