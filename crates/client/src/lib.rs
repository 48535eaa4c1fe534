//! HTTP client for driving campaigns against a live node.
//!
//! `HttpTransport` implements the engine's `Transport` trait over a node's
//! JSON RPC surface: operation submission, status polling, per-account
//! pending counts, and the status probe the readiness wait is built on.

mod http;
mod types;

pub use http::HttpTransport;
pub use types::{
    NodeStatus, NodeStatusResponse, OperationStatusResponse, PendingCountResponse,
    SubmitOperationRequest, SubmitOperationResponse,
};
