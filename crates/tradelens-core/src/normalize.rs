//! Event normalization — decoded field maps to typed event records.
//!
//! Each known signature has a fixed field-selection policy; anything else
//! passes through as an `Other` record carrying the raw name and the full
//! field map. This is the single place event names are inspected.

use crate::error::DecodeError;
use crate::event::{DecodedEvent, OrderFill, SingleTransfer, TokenApproval, TokenTransfer};
use crate::types::FieldMap;

/// Map decoded fields into the output record for `signature_name`.
///
/// Fails with `MissingField` if a known kind's mapping cannot be satisfied;
/// the caller treats that like any other decode failure for the log.
pub fn normalize(signature_name: &str, fields: FieldMap) -> Result<DecodedEvent, DecodeError> {
    match signature_name {
        "OrderFilled" => Ok(DecodedEvent::OrderFilled(OrderFill {
            order_hash: take(&fields, signature_name, "orderHash")?,
            maker: take(&fields, signature_name, "maker")?,
            taker: take(&fields, signature_name, "taker")?,
            maker_asset_id: take(&fields, signature_name, "makerAssetId")?,
            taker_asset_id: take(&fields, signature_name, "takerAssetId")?,
            maker_amount_filled: take(&fields, signature_name, "makerAmountFilled")?,
            taker_amount_filled: take(&fields, signature_name, "takerAmountFilled")?,
            fee: take(&fields, signature_name, "fee")?,
        })),
        "Transfer" => Ok(DecodedEvent::Transfer(TokenTransfer {
            from: take(&fields, signature_name, "from")?,
            to: take(&fields, signature_name, "to")?,
            value: take(&fields, signature_name, "value")?,
        })),
        "Approval" => Ok(DecodedEvent::Approval(TokenApproval {
            owner: take(&fields, signature_name, "owner")?,
            spender: take(&fields, signature_name, "spender")?,
            value: take(&fields, signature_name, "value")?,
        })),
        "TransferSingle" => Ok(DecodedEvent::TransferSingle(SingleTransfer {
            operator: take(&fields, signature_name, "operator")?,
            from: take(&fields, signature_name, "from")?,
            to: take(&fields, signature_name, "to")?,
            // The ERC-1155 contract calls this parameter `id`.
            token_id: take(&fields, signature_name, "id")?,
            value: take(&fields, signature_name, "value")?,
        })),
        _ => Ok(DecodedEvent::Other { name: signature_name.to_string(), fields }),
    }
}

fn take(fields: &FieldMap, event: &str, field: &str) -> Result<String, DecodeError> {
    fields
        .get(field)
        .map(|v| v.to_string())
        .ok_or_else(|| DecodeError::MissingField {
            event: event.to_string(),
            field: field.to_string(),
        })
}
