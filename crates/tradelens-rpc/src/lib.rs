//! tradelens-rpc — Polygon JSON-RPC receipt client and trade lookup.

pub mod client;
pub mod error;
pub mod lookup;
pub mod wire;

pub use client::{HttpReceiptClient, ReceiptSource, DEFAULT_RPC_URL};
pub use error::{LookupError, RpcError};
pub use lookup::TradeLookup;
pub use wire::{TransactionReceipt, WireLog};
