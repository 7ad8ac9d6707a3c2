//! JSON-RPC 2.0 wire types and the receipt shapes returned by
//! `eth_getTransactionReceipt`.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tradelens_core::error::DecodeError;
use tradelens_core::event::RawLog;

/// A JSON-RPC 2.0 request.
#[derive(Debug, Clone, Serialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    pub method: String,
    pub params: Vec<Value>,
    pub id: u64,
}

impl JsonRpcRequest {
    pub fn new(id: u64, method: impl Into<String>, params: Vec<Value>) -> Self {
        Self {
            jsonrpc: "2.0".into(),
            method: method.into(),
            params,
            id,
        }
    }
}

/// A JSON-RPC 2.0 error object.
#[derive(Debug, Clone, Deserialize)]
pub struct JsonRpcError {
    pub code: i64,
    pub message: String,
}

/// A JSON-RPC 2.0 response. The `id` echo is ignored; requests are sent one
/// at a time.
#[derive(Debug, Clone, Deserialize)]
pub struct JsonRpcResponse {
    #[serde(default)]
    pub result: Option<Value>,
    #[serde(default)]
    pub error: Option<JsonRpcError>,
}

impl JsonRpcResponse {
    /// Unwrap the result value or return the endpoint's error object.
    pub fn into_result(self) -> Result<Value, JsonRpcError> {
        if let Some(err) = self.error {
            Err(err)
        } else {
            Ok(self.result.unwrap_or(Value::Null))
        }
    }
}

/// A transaction receipt as returned by `eth_getTransactionReceipt`.
///
/// Only the fields the lookup flow reads are modeled; the node returns more
/// and serde ignores them.
#[derive(Debug, Clone, Deserialize)]
pub struct TransactionReceipt {
    #[serde(rename = "transactionHash")]
    pub transaction_hash: String,
    #[serde(rename = "blockNumber")]
    pub block_number: Option<String>,
    #[serde(rename = "status")]
    pub status: Option<String>,
    #[serde(default)]
    pub logs: Vec<WireLog>,
}

impl TransactionReceipt {
    /// Returns the block number as u64, or 0 when the node omitted it.
    pub fn block_number_u64(&self) -> u64 {
        self.block_number.as_deref().map(parse_hex_u64).unwrap_or(0)
    }

    /// Returns `true` if the transaction succeeded (`status == 0x1`).
    pub fn succeeded(&self) -> bool {
        self.status.as_deref().map(parse_hex_u64) == Some(1)
    }
}

/// One log entry inside a receipt, hex-encoded as the node sends it.
#[derive(Debug, Clone, Deserialize)]
pub struct WireLog {
    pub address: String,
    pub topics: Vec<String>,
    pub data: String,
    #[serde(rename = "logIndex")]
    pub log_index: Option<String>,
    pub removed: Option<bool>,
}

impl WireLog {
    /// Returns the log index as u64, or 0 when the node omitted it.
    pub fn log_index_u64(&self) -> u64 {
        self.log_index.as_deref().map(parse_hex_u64).unwrap_or(0)
    }
}

impl TryFrom<&WireLog> for RawLog {
    type Error = DecodeError;

    /// Hex-decode the data payload. Topics stay as strings; the decoder
    /// validates them word by word.
    fn try_from(wire: &WireLog) -> Result<Self, Self::Error> {
        let hex_data = wire.data.strip_prefix("0x").unwrap_or(&wire.data);
        let data = hex::decode(hex_data).map_err(|e| DecodeError::InvalidRawLog {
            reason: format!("log data is not hex: {e}"),
        })?;
        Ok(RawLog {
            address: wire.address.clone(),
            topics: wire.topics.clone(),
            data,
        })
    }
}

/// Parse a hex-encoded quantity (with or without `0x`) to u64.
pub fn parse_hex_u64(s: &str) -> u64 {
    let s = s.strip_prefix("0x").unwrap_or(s);
    u64::from_str_radix(s, 16).unwrap_or(0)
}
