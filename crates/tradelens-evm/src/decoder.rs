//! `LogDecoder` — log matching and field decoding for receipt logs.

use alloy_core::dyn_abi::{DynSolType, DynSolValue};
use alloy_primitives::{Address, U256};
use std::sync::Arc;
use tradelens_core::error::DecodeError;
use tradelens_core::event::{DecodedEvent, RawLog};
use tradelens_core::registry::SignatureRegistry;
use tradelens_core::signature::{builtin, EventParam, EventSignature};
use tradelens_core::topic;
use tradelens_core::types::{FieldMap, FieldValue, ParamType};
use tracing::{debug, warn};

use crate::normalizer;

/// How a matched log will be decoded. Chosen once at match time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeRoute {
    /// Order-fill logs are decoded word-by-word, bypassing the generic ABI
    /// library. The match is exact topic equality, so a library that cannot
    /// parse this shape can never silently drop these events.
    OrderFill,
    /// Everything else goes through registry lookup and `alloy` ABI decode.
    Generic,
}

/// Result of classifying a log's first topic.
#[derive(Debug)]
pub enum MatchResult<'a> {
    Matched {
        signature: &'a EventSignature,
        route: DecodeRoute,
    },
    Unmatched,
}

/// Decoded events plus per-log skip diagnostics for one batch.
#[derive(Debug, Default)]
pub struct DecodeOutcome {
    /// Successfully decoded events, in receipt order.
    pub events: Vec<DecodedEvent>,
    /// `(input index, reason)` for each malformed log that was skipped.
    /// Unmatched logs are dropped silently and do not appear here.
    pub skipped: Vec<(usize, DecodeError)>,
}

/// The decoding engine. Holds a shared, read-only signature registry and the
/// precomputed order-fill topic.
///
/// Decoding is pure and performs no I/O; the decoder is `Send + Sync` and a
/// single instance may serve any number of concurrent lookups.
#[derive(Debug, Clone)]
pub struct LogDecoder {
    registry: Arc<SignatureRegistry>,
    order_fill: EventSignature,
}

impl LogDecoder {
    pub fn new(registry: Arc<SignatureRegistry>) -> Self {
        Self {
            registry,
            order_fill: builtin::order_filled(),
        }
    }

    /// The registry this decoder matches against.
    pub fn registry(&self) -> &SignatureRegistry {
        &self.registry
    }

    /// Classify a log by its first topic.
    ///
    /// The order-fill topic is checked first, by exact equality and without
    /// consulting the registry; all other signatures go through generic
    /// registry lookup. A log with no topics is `Unmatched`.
    pub fn match_log(&self, raw: &RawLog) -> MatchResult<'_> {
        let Some(topic) = topic::from_topics(&raw.topics) else {
            return MatchResult::Unmatched;
        };
        if &topic == self.order_fill.topic() {
            return MatchResult::Matched {
                signature: &self.order_fill,
                route: DecodeRoute::OrderFill,
            };
        }
        match self.registry.lookup(&topic) {
            Some(signature) => MatchResult::Matched {
                signature,
                route: DecodeRoute::Generic,
            },
            None => MatchResult::Unmatched,
        }
    }

    /// Decode a matched log's fields against a signature.
    pub fn decode(
        &self,
        raw: &RawLog,
        signature: &EventSignature,
    ) -> Result<FieldMap, DecodeError> {
        let route = if signature.topic() == self.order_fill.topic() {
            DecodeRoute::OrderFill
        } else {
            DecodeRoute::Generic
        };
        self.decode_fields(raw, signature, route)
    }

    /// Match, decode, and normalize a single log.
    ///
    /// `Ok(None)` means the log matched nothing and is dropped; `Err` means
    /// it matched but is malformed (the caller skips it).
    pub fn decode_log(&self, raw: &RawLog) -> Result<Option<DecodedEvent>, DecodeError> {
        match self.match_log(raw) {
            MatchResult::Unmatched => {
                debug!(topic = raw.signature_topic().unwrap_or("<none>"), "log matched no signature");
                Ok(None)
            }
            MatchResult::Matched { signature, route } => {
                let fields = self.decode_fields(raw, signature, route)?;
                let event = tradelens_core::normalize::normalize(&signature.name, fields)?;
                Ok(Some(event))
            }
        }
    }

    /// Decode a batch of logs in receipt order.
    ///
    /// Unmatched logs produce no record; malformed logs are skipped with a
    /// diagnostic. Neither aborts the batch.
    pub fn decode_batch(&self, logs: &[RawLog]) -> DecodeOutcome {
        let mut outcome = DecodeOutcome::default();
        for (idx, raw) in logs.iter().enumerate() {
            match self.decode_log(raw) {
                Ok(Some(event)) => outcome.events.push(event),
                Ok(None) => {}
                Err(err) => {
                    warn!(index = idx, error = %err, "skipping undecodable log");
                    outcome.skipped.push((idx, err));
                }
            }
        }
        outcome
    }

    fn decode_fields(
        &self,
        raw: &RawLog,
        signature: &EventSignature,
        route: DecodeRoute,
    ) -> Result<FieldMap, DecodeError> {
        let indexed = signature.indexed_params();
        let found = raw.topics.len().saturating_sub(1);
        if found != indexed.len() {
            return Err(DecodeError::TopicCountMismatch {
                expected: indexed.len(),
                found,
            });
        }
        match route {
            DecodeRoute::OrderFill => self.decode_order_fill(raw),
            DecodeRoute::Generic => self.decode_generic(raw, signature, &indexed),
        }
    }

    /// Dedicated order-fill path: topics read as hash/address/address, then
    /// exactly five uint256 words from the payload.
    fn decode_order_fill(&self, raw: &RawLog) -> Result<FieldMap, DecodeError> {
        const DATA_FIELDS: [&str; 5] = [
            "makerAssetId",
            "takerAssetId",
            "makerAmountFilled",
            "takerAmountFilled",
            "fee",
        ];

        let mut fields = FieldMap::new();
        fields.insert(
            "orderHash".into(),
            decode_topic_word(&raw.topics[1], ParamType::FixedBytes(32))?,
        );
        fields.insert(
            "maker".into(),
            decode_topic_word(&raw.topics[2], ParamType::Address)?,
        );
        fields.insert(
            "taker".into(),
            decode_topic_word(&raw.topics[3], ParamType::Address)?,
        );

        let needed = DATA_FIELDS.len() * ParamType::WORD_BYTES;
        check_payload_len(raw.data.len(), needed)?;
        for (i, name) in DATA_FIELDS.iter().enumerate() {
            let word = &raw.data[i * ParamType::WORD_BYTES..(i + 1) * ParamType::WORD_BYTES];
            let value = U256::from_be_slice(word);
            fields.insert((*name).into(), FieldValue::Uint(value.to_string()));
        }
        Ok(fields)
    }

    /// Generic path: topics decoded per type tag, payload decoded as an
    /// ABI tuple of the non-indexed parameters.
    fn decode_generic(
        &self,
        raw: &RawLog,
        signature: &EventSignature,
        indexed: &[&EventParam],
    ) -> Result<FieldMap, DecodeError> {
        let mut fields = FieldMap::new();

        // topics[0] is the signature topic
        for (i, param) in indexed.iter().enumerate() {
            let value = decode_topic_word(&raw.topics[i + 1], param.ty)?;
            fields.insert(param.name.clone(), value);
        }

        let data_params = signature.data_params();
        let needed = data_params.len() * ParamType::WORD_BYTES;
        check_payload_len(raw.data.len(), needed)?;
        if data_params.is_empty() {
            return Ok(fields);
        }

        let tuple_type =
            DynSolType::Tuple(data_params.iter().map(|p| param_to_dyn(p.ty)).collect());
        let decoded = tuple_type
            .abi_decode(&raw.data)
            .map_err(|e| DecodeError::AbiDecodeFailed { reason: e.to_string() })?;
        let values = match decoded {
            DynSolValue::Tuple(vals) => vals,
            other => vec![other],
        };

        for (param, value) in data_params.iter().zip(values.into_iter()) {
            fields.insert(param.name.clone(), normalizer::normalize(value)?);
        }
        Ok(fields)
    }
}

/// Build an alloy `DynSolType` from a parameter type tag. Total because the
/// tag set contains only single-word value types.
fn param_to_dyn(ty: ParamType) -> DynSolType {
    match ty {
        ParamType::Uint(bits) => DynSolType::Uint(bits as usize),
        ParamType::Bool => DynSolType::Bool,
        ParamType::Address => DynSolType::Address,
        ParamType::FixedBytes(n) => DynSolType::FixedBytes(n as usize),
    }
}

fn check_payload_len(have: usize, needed: usize) -> Result<(), DecodeError> {
    if have < needed {
        return Err(DecodeError::PayloadTooShort { needed, have });
    }
    if have != needed {
        return Err(DecodeError::PayloadSizeMismatch { needed, have });
    }
    Ok(())
}

/// Decode one 32-byte indexed topic word by its type tag.
///
/// Address words keep only the low 20 bytes without validating the upper
/// twelve; contracts in the wild emit dirty upper bytes and the observed
/// traffic expects them ignored.
fn decode_topic_word(topic: &str, ty: ParamType) -> Result<FieldValue, DecodeError> {
    let word = topic::decode_word(topic).ok_or_else(|| DecodeError::InvalidRawLog {
        reason: format!("topic is not a 32-byte hex word: {topic}"),
    })?;
    Ok(match ty {
        ParamType::Address => {
            let address = Address::from_slice(&word[12..]);
            FieldValue::Address(address.to_checksum(None))
        }
        ParamType::Uint(_) => FieldValue::Uint(U256::from_be_slice(&word).to_string()),
        ParamType::Bool => FieldValue::Bool(word.iter().any(|b| *b != 0)),
        ParamType::FixedBytes(32) => FieldValue::Hash(format!("0x{}", hex::encode(word))),
        ParamType::FixedBytes(n) => {
            FieldValue::Bytes(format!("0x{}", hex::encode(&word[..n as usize])))
        }
    })
}
