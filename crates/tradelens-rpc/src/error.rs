//! Error types for receipt fetching and trade lookup.

use thiserror::Error;

/// Transport and protocol failures from the JSON-RPC endpoint.
///
/// A failed fetch surfaces immediately; there is no retry layer.
#[derive(Debug, Error)]
pub enum RpcError {
    /// Connection, timeout, TLS, non-2xx status, or an undecodable body.
    #[error("HTTP error: {0}")]
    Http(String),

    /// The endpoint answered with a JSON-RPC error object.
    #[error("RPC error {code}: {message}")]
    JsonRpc { code: i64, message: String },

    /// A 200 response whose result is not the expected receipt shape.
    #[error("Unexpected RPC response: {0}")]
    InvalidResponse(String),
}

/// Failures surfaced by the trade lookup flow.
///
/// Input validation errors are raised before any network call is made. An
/// empty decode result is not an error; it is reported as an ordinary
/// outcome by the caller.
#[derive(Debug, Error)]
pub enum LookupError {
    /// The node has no receipt for this hash (unknown transaction, or the
    /// wrong network).
    #[error("No receipt found for transaction {0}")]
    ReceiptNotFound(String),

    /// The transaction hash is not a 32-byte hex string.
    #[error("Invalid transaction hash: {0}")]
    InvalidTxHash(String),

    /// The maker filter is not a valid EVM address.
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error(transparent)]
    Rpc(#[from] RpcError),
}
