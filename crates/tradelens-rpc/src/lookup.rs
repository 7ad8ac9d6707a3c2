//! Trade lookup: fetch a receipt and turn its logs into decoded events.

use alloy_primitives::{Address, B256};
use std::sync::Arc;
use tracing::warn;

use tradelens_core::event::{DecodedEvent, OrderFill, RawLog};
use tradelens_core::registry::SignatureRegistry;
use tradelens_evm::LogDecoder;

use crate::client::ReceiptSource;
use crate::error::LookupError;
use crate::wire::TransactionReceipt;

/// Receipt-driven event lookup over any `ReceiptSource`.
pub struct TradeLookup<S> {
    source: S,
    decoder: LogDecoder,
}

impl<S: ReceiptSource> TradeLookup<S> {
    pub fn new(source: S, registry: Arc<SignatureRegistry>) -> Self {
        Self {
            source,
            decoder: LogDecoder::new(registry),
        }
    }

    /// Lookup over the builtin signature set.
    pub fn with_builtin(source: S) -> Self {
        Self::new(source, Arc::new(SignatureRegistry::with_builtin()))
    }

    pub fn decoder(&self) -> &LogDecoder {
        &self.decoder
    }

    /// Fetch the receipt for `tx_hash` and decode its logs in order.
    ///
    /// The hash is validated before any network call. Unmatched logs produce
    /// no record; malformed ones are skipped with a diagnostic. An empty
    /// event list is an ordinary outcome, not an error.
    pub async fn transaction_events(
        &self,
        tx_hash: &str,
    ) -> Result<(TransactionReceipt, Vec<DecodedEvent>), LookupError> {
        let hash = parse_tx_hash(tx_hash)?;
        let receipt = self
            .source
            .transaction_receipt(hash)
            .await?
            .ok_or_else(|| LookupError::ReceiptNotFound(tx_hash.to_string()))?;

        let mut raw_logs = Vec::with_capacity(receipt.logs.len());
        for wire in &receipt.logs {
            match RawLog::try_from(wire) {
                Ok(raw) => raw_logs.push(raw),
                Err(err) => {
                    warn!(
                        log_index = wire.log_index_u64(),
                        error = %err,
                        "skipping malformed log entry"
                    );
                }
            }
        }

        let outcome = self.decoder.decode_batch(&raw_logs);
        Ok((receipt, outcome.events))
    }

    /// Fetch a receipt and keep the order fills whose maker matches the
    /// given address, compared case-insensitively.
    ///
    /// The maker address is validated before any network call.
    pub async fn fills_by_maker(
        &self,
        tx_hash: &str,
        maker: &str,
    ) -> Result<Vec<OrderFill>, LookupError> {
        let needle = parse_address(maker)?.to_checksum(None);
        let (_, events) = self.transaction_events(tx_hash).await?;
        Ok(events
            .into_iter()
            .filter_map(|event| match event {
                DecodedEvent::OrderFilled(fill)
                    if fill.maker.eq_ignore_ascii_case(&needle) =>
                {
                    Some(fill)
                }
                _ => None,
            })
            .collect())
    }
}

fn parse_tx_hash(s: &str) -> Result<B256, LookupError> {
    s.parse::<B256>()
        .map_err(|_| LookupError::InvalidTxHash(s.to_string()))
}

fn parse_address(s: &str) -> Result<Address, LookupError> {
    s.parse::<Address>()
        .map_err(|_| LookupError::InvalidAddress(s.to_string()))
}
