//! Primitive type tags and canonicalized field values.
//!
//! Every decoded log field is rendered into a `FieldValue` before it reaches
//! a consumer: integers become decimal strings (uint256 does not fit any
//! native width), addresses become EIP-55 checksummed hex, byte words become
//! 0x-prefixed hex. Consumers never see chain-native representations.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The closed set of parameter type tags this engine decodes.
/// Each variant corresponds to a single-word EVM ABI value type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamType {
    /// Unsigned integer (uint8 .. uint256). Width in bits.
    Uint(u16),
    /// Boolean
    Bool,
    /// 20-byte EVM address
    Address,
    /// Fixed-size byte array (bytes1 .. bytes32). Length in bytes.
    FixedBytes(u8),
}

impl ParamType {
    /// Every tag in this set occupies exactly one 32-byte word, both as a
    /// topic and in the data payload.
    pub const WORD_BYTES: usize = 32;
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamType::Uint(bits) => write!(f, "uint{bits}"),
            ParamType::Bool => write!(f, "bool"),
            ParamType::Address => write!(f, "address"),
            ParamType::FixedBytes(n) => write!(f, "bytes{n}"),
        }
    }
}

/// A decoded, canonicalized scalar value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum FieldValue {
    /// Unsigned integer as a decimal string (preserves full uint256 range)
    Uint(String),
    /// Signed integer as a decimal string
    Int(String),
    Bool(bool),
    /// EVM address — 20 bytes, hex with 0x prefix, EIP-55 checksummed
    Address(String),
    /// 32-byte word — hex with 0x prefix, lowercase
    Hash(String),
    /// Other byte sequences — hex with 0x prefix, lowercase
    Bytes(String),
    Str(String),
}

impl FieldValue {
    /// Returns the inner string if this is an Address value.
    pub fn as_address(&self) -> Option<&str> {
        match self {
            FieldValue::Address(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Returns the decimal string if this is a Uint value.
    pub fn as_uint(&self) -> Option<&str> {
        match self {
            FieldValue::Uint(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Returns the hex string if this is a Hash value.
    pub fn as_hash(&self) -> Option<&str> {
        match self {
            FieldValue::Hash(s) => Some(s.as_str()),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Uint(v) => write!(f, "{v}"),
            FieldValue::Int(v) => write!(f, "{v}"),
            FieldValue::Bool(v) => write!(f, "{v}"),
            FieldValue::Address(a) => write!(f, "{a}"),
            FieldValue::Hash(h) => write!(f, "{h}"),
            FieldValue::Bytes(b) => write!(f, "{b}"),
            FieldValue::Str(s) => write!(f, "{s}"),
        }
    }
}

/// Decoded fields keyed by parameter name, in declaration order.
/// Insertion order matters: pass-through records expose it verbatim.
pub type FieldMap = IndexMap<String, FieldValue>;
