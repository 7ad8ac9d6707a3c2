//! Event signatures — the in-memory description of a decodable event.

use crate::topic::{self, TopicHash};
use crate::types::ParamType;
use serde::{Deserialize, Serialize};

/// One parameter of an event signature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventParam {
    /// Parameter name as declared by the contract, e.g. "makerAssetId"
    pub name: String,
    /// Type tag
    pub ty: ParamType,
    /// EVM: is this parameter stored in a topic rather than the data payload?
    pub indexed: bool,
}

impl EventParam {
    /// An indexed parameter (carried in topics[1..]).
    pub fn indexed(name: impl Into<String>, ty: ParamType) -> Self {
        Self { name: name.into(), ty, indexed: true }
    }

    /// A non-indexed parameter (carried in the data payload).
    pub fn plain(name: impl Into<String>, ty: ParamType) -> Self {
        Self { name: name.into(), ty, indexed: false }
    }
}

/// A decodable event: name, ordered parameters, and the topic hash derived
/// from them. Immutable once constructed.
///
/// The topic hash is a pure function of the name and the ordered parameter
/// type tags; parameter names and indexed flags never enter the preimage,
/// matching how contracts canonicalize event signatures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventSignature {
    /// Event name as emitted by the contract, e.g. "OrderFilled"
    pub name: String,
    /// Ordered parameter definitions (order matters for ABI decode)
    pub params: Vec<EventParam>,
    /// keccak256 of the canonical signature string, computed at construction
    topic: TopicHash,
}

impl EventSignature {
    pub fn new(name: impl Into<String>, params: Vec<EventParam>) -> Self {
        let name = name.into();
        let topic = topic::keccak256_signature(&canonical_string(&name, &params));
        Self { name, params, topic }
    }

    /// The canonical ABI signature string, e.g.
    /// `"Transfer(address,address,uint256)"`.
    pub fn canonical(&self) -> String {
        canonical_string(&self.name, &self.params)
    }

    /// The precomputed signature topic (topics[0] of a matching log).
    pub fn topic(&self) -> &TopicHash {
        &self.topic
    }

    /// Returns only the indexed parameters (topics[1..]), in order.
    pub fn indexed_params(&self) -> Vec<&EventParam> {
        self.params.iter().filter(|p| p.indexed).collect()
    }

    /// Returns only the non-indexed parameters (data payload), in order.
    pub fn data_params(&self) -> Vec<&EventParam> {
        self.params.iter().filter(|p| !p.indexed).collect()
    }
}

fn canonical_string(name: &str, params: &[EventParam]) -> String {
    let types: Vec<String> = params.iter().map(|p| p.ty.to_string()).collect();
    format!("{}({})", name, types.join(","))
}

/// The signatures this application ships with.
pub mod builtin {
    use super::*;

    /// CTF exchange order fill:
    /// `OrderFilled(bytes32 indexed orderHash, address indexed maker,
    /// address indexed taker, uint256 makerAssetId, uint256 takerAssetId,
    /// uint256 makerAmountFilled, uint256 takerAmountFilled, uint256 fee)`.
    pub fn order_filled() -> EventSignature {
        EventSignature::new(
            "OrderFilled",
            vec![
                EventParam::indexed("orderHash", ParamType::FixedBytes(32)),
                EventParam::indexed("maker", ParamType::Address),
                EventParam::indexed("taker", ParamType::Address),
                EventParam::plain("makerAssetId", ParamType::Uint(256)),
                EventParam::plain("takerAssetId", ParamType::Uint(256)),
                EventParam::plain("makerAmountFilled", ParamType::Uint(256)),
                EventParam::plain("takerAmountFilled", ParamType::Uint(256)),
                EventParam::plain("fee", ParamType::Uint(256)),
            ],
        )
    }

    /// ERC-20 `Transfer(address indexed from, address indexed to, uint256 value)`.
    pub fn erc20_transfer() -> EventSignature {
        EventSignature::new(
            "Transfer",
            vec![
                EventParam::indexed("from", ParamType::Address),
                EventParam::indexed("to", ParamType::Address),
                EventParam::plain("value", ParamType::Uint(256)),
            ],
        )
    }

    /// ERC-20 `Approval(address indexed owner, address indexed spender, uint256 value)`.
    pub fn erc20_approval() -> EventSignature {
        EventSignature::new(
            "Approval",
            vec![
                EventParam::indexed("owner", ParamType::Address),
                EventParam::indexed("spender", ParamType::Address),
                EventParam::plain("value", ParamType::Uint(256)),
            ],
        )
    }

    /// ERC-1155 `TransferSingle(address indexed operator, address indexed from,
    /// address indexed to, uint256 id, uint256 value)`.
    pub fn erc1155_transfer_single() -> EventSignature {
        EventSignature::new(
            "TransferSingle",
            vec![
                EventParam::indexed("operator", ParamType::Address),
                EventParam::indexed("from", ParamType::Address),
                EventParam::indexed("to", ParamType::Address),
                EventParam::plain("id", ParamType::Uint(256)),
                EventParam::plain("value", ParamType::Uint(256)),
            ],
        )
    }

    /// All built-in signatures, in registration order.
    pub fn all() -> Vec<EventSignature> {
        vec![
            order_filled(),
            erc20_transfer(),
            erc20_approval(),
            erc1155_transfer_single(),
        ]
    }
}
