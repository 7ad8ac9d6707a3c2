//! Converts alloy-core `DynSolValue` → TradeLens `FieldValue`.
//!
//! This is where ABI-decoded values are canonicalized: integers to decimal
//! strings, addresses to EIP-55 checksummed hex, byte words to 0x hex.

use alloy_core::dyn_abi::DynSolValue;
use tradelens_core::error::DecodeError;
use tradelens_core::types::FieldValue;

/// Convert a decoded `DynSolValue` into a `FieldValue`.
///
/// Composite values are rejected: every registered parameter type is a
/// single-word scalar, so anything else means the signature and the payload
/// disagree.
pub fn normalize(val: DynSolValue) -> Result<FieldValue, DecodeError> {
    match val {
        DynSolValue::Bool(b) => Ok(FieldValue::Bool(b)),

        // uint256 exceeds every native width; decimal strings keep full precision.
        DynSolValue::Uint(u, _bits) => Ok(FieldValue::Uint(u.to_string())),

        DynSolValue::Int(i, _bits) => Ok(FieldValue::Int(i.to_string())),

        DynSolValue::Address(a) => Ok(FieldValue::Address(a.to_checksum(None))),

        DynSolValue::FixedBytes(word, size) => {
            let bytes = &word.as_slice()[..size.min(32)];
            if size == 32 {
                Ok(FieldValue::Hash(format!("0x{}", hex::encode(bytes))))
            } else {
                Ok(FieldValue::Bytes(format!("0x{}", hex::encode(bytes))))
            }
        }

        DynSolValue::Bytes(b) => Ok(FieldValue::Bytes(format!("0x{}", hex::encode(b)))),

        DynSolValue::String(s) => Ok(FieldValue::Str(s)),

        other => Err(DecodeError::AbiDecodeFailed {
            reason: format!("unsupported value shape: {:?}", other.sol_type_name()),
        }),
    }
}
