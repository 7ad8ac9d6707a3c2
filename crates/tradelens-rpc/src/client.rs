//! HTTP receipt source backed by `reqwest`.

use alloy_primitives::B256;
use async_trait::async_trait;
use serde_json::json;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tracing::debug;

use crate::error::RpcError;
use crate::wire::{JsonRpcRequest, JsonRpcResponse, TransactionReceipt};

/// Public Polygon mainnet endpoint, used when no other URL is configured.
pub const DEFAULT_RPC_URL: &str = "https://polygon-rpc.com";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Anything that can produce transaction receipts.
#[async_trait]
pub trait ReceiptSource: Send + Sync {
    /// Fetch the receipt for a transaction hash. `None` means the node has
    /// no receipt for it.
    async fn transaction_receipt(
        &self,
        hash: B256,
    ) -> Result<Option<TransactionReceipt>, RpcError>;
}

/// Receipt source speaking JSON-RPC over HTTP.
///
/// One request per lookup, no retries.
pub struct HttpReceiptClient {
    url: String,
    http: reqwest::Client,
    next_id: AtomicU64,
}

impl HttpReceiptClient {
    pub fn new(url: impl Into<String>) -> Self {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("failed to build reqwest client");
        Self {
            url: url.into(),
            http,
            next_id: AtomicU64::new(1),
        }
    }

    /// Client pointed at the public Polygon endpoint.
    pub fn polygon() -> Self {
        Self::new(DEFAULT_RPC_URL)
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    async fn call(
        &self,
        method: &str,
        params: Vec<serde_json::Value>,
    ) -> Result<serde_json::Value, RpcError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let request = JsonRpcRequest::new(id, method, params);
        debug!(method, id, url = %self.url, "sending rpc request");

        let resp = self
            .http
            .post(&self.url)
            .json(&request)
            .send()
            .await
            .map_err(|e| RpcError::Http(e.to_string()))?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(RpcError::Http(format!("HTTP {status}: {body}")));
        }

        let response: JsonRpcResponse = resp
            .json()
            .await
            .map_err(|e| RpcError::Http(e.to_string()))?;
        response
            .into_result()
            .map_err(|e| RpcError::JsonRpc { code: e.code, message: e.message })
    }
}

#[async_trait]
impl ReceiptSource for HttpReceiptClient {
    async fn transaction_receipt(
        &self,
        hash: B256,
    ) -> Result<Option<TransactionReceipt>, RpcError> {
        let result = self
            .call("eth_getTransactionReceipt", vec![json!(format!("{hash:#x}"))])
            .await?;
        if result.is_null() {
            return Ok(None);
        }
        serde_json::from_value(result)
            .map(Some)
            .map_err(|e| RpcError::InvalidResponse(e.to_string()))
    }
}
