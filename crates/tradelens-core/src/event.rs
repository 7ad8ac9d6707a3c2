//! Raw log input and decoded event output types.

use crate::types::{FieldMap, FieldValue};
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

/// One log entry from a transaction receipt, as handed to the engine.
/// This is the input to every decode call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawLog {
    /// Contract address that emitted the log
    pub address: String,
    /// topics[0] is the event signature hash; additional topics are
    /// indexed parameter values in declaration order.
    pub topics: Vec<String>,
    /// ABI-encoded non-indexed parameter values, word-aligned.
    pub data: Vec<u8>,
}

impl RawLog {
    /// Returns topics[0] as the event signature topic, if present.
    pub fn signature_topic(&self) -> Option<&str> {
        self.topics.first().map(|s| s.as_str())
    }
}

/// A CTF exchange order fill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderFill {
    pub order_hash: String,
    pub maker: String,
    pub taker: String,
    pub maker_asset_id: String,
    pub taker_asset_id: String,
    pub maker_amount_filled: String,
    pub taker_amount_filled: String,
    pub fee: String,
}

/// An ERC-20 transfer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenTransfer {
    pub from: String,
    pub to: String,
    pub value: String,
}

/// An ERC-20 approval.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenApproval {
    pub owner: String,
    pub spender: String,
    pub value: String,
}

/// An ERC-1155 single-token transfer. The contract's raw `id` parameter is
/// exposed as `tokenId`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SingleTransfer {
    pub operator: String,
    pub from: String,
    pub to: String,
    pub token_id: String,
    pub value: String,
}

/// A fully decoded event — the primary output of the engine.
///
/// Known kinds carry fixed-field records; signatures registered without a
/// fixed mapping surface through `Other` with their raw name and the full
/// field map in declaration order. The variant is chosen once when the log
/// is matched and decoded; nothing downstream branches on event names.
#[derive(Debug, Clone, PartialEq)]
pub enum DecodedEvent {
    OrderFilled(OrderFill),
    Transfer(TokenTransfer),
    Approval(TokenApproval),
    TransferSingle(SingleTransfer),
    Other { name: String, fields: FieldMap },
}

impl DecodedEvent {
    /// The kind discriminant: the known event name, or the raw signature
    /// name for pass-through records.
    pub fn kind(&self) -> &str {
        match self {
            DecodedEvent::OrderFilled(_) => "OrderFilled",
            DecodedEvent::Transfer(_) => "Transfer",
            DecodedEvent::Approval(_) => "Approval",
            DecodedEvent::TransferSingle(_) => "TransferSingle",
            DecodedEvent::Other { name, .. } => name.as_str(),
        }
    }

    /// Returns the order-fill record if this is an `OrderFilled` event.
    pub fn as_order_fill(&self) -> Option<&OrderFill> {
        match self {
            DecodedEvent::OrderFilled(fill) => Some(fill),
            _ => None,
        }
    }
}

/// Serializes as a single flat object: `{"type": <kind>, <field>: <value>, ...}`.
/// Pass-through records keep their raw name as the tag, so newly registered
/// signatures render exactly like built-in ones.
impl Serialize for DecodedEvent {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            DecodedEvent::OrderFilled(e) => {
                let mut map = serializer.serialize_map(Some(9))?;
                map.serialize_entry("type", "OrderFilled")?;
                map.serialize_entry("orderHash", &e.order_hash)?;
                map.serialize_entry("maker", &e.maker)?;
                map.serialize_entry("taker", &e.taker)?;
                map.serialize_entry("makerAssetId", &e.maker_asset_id)?;
                map.serialize_entry("takerAssetId", &e.taker_asset_id)?;
                map.serialize_entry("makerAmountFilled", &e.maker_amount_filled)?;
                map.serialize_entry("takerAmountFilled", &e.taker_amount_filled)?;
                map.serialize_entry("fee", &e.fee)?;
                map.end()
            }
            DecodedEvent::Transfer(e) => {
                let mut map = serializer.serialize_map(Some(4))?;
                map.serialize_entry("type", "Transfer")?;
                map.serialize_entry("from", &e.from)?;
                map.serialize_entry("to", &e.to)?;
                map.serialize_entry("value", &e.value)?;
                map.end()
            }
            DecodedEvent::Approval(e) => {
                let mut map = serializer.serialize_map(Some(4))?;
                map.serialize_entry("type", "Approval")?;
                map.serialize_entry("owner", &e.owner)?;
                map.serialize_entry("spender", &e.spender)?;
                map.serialize_entry("value", &e.value)?;
                map.end()
            }
            DecodedEvent::TransferSingle(e) => {
                let mut map = serializer.serialize_map(Some(6))?;
                map.serialize_entry("type", "TransferSingle")?;
                map.serialize_entry("operator", &e.operator)?;
                map.serialize_entry("from", &e.from)?;
                map.serialize_entry("to", &e.to)?;
                map.serialize_entry("tokenId", &e.token_id)?;
                map.serialize_entry("value", &e.value)?;
                map.end()
            }
            DecodedEvent::Other { name, fields } => {
                let mut map = serializer.serialize_map(Some(fields.len() + 1))?;
                map.serialize_entry("type", name)?;
                for (key, value) in fields {
                    match value {
                        FieldValue::Bool(b) => map.serialize_entry(key, b)?,
                        other => map.serialize_entry(key, &other.to_string())?,
                    }
                }
                map.end()
            }
        }
    }
}
