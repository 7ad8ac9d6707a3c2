//! Event topic hashing.
//!
//! The first topic of an EVM log is the keccak256 hash of the event's
//! canonical signature string, e.g.:
//!   keccak256("Transfer(address,address,uint256)")
//!   → 0xddf252ad1be2c89b69c2b068fc378daa952ba7f163c4a11628f55a4df523b3ef
//!
//! For raw logs, topics[0] already carries the hash; match time never
//! recomputes it.

use serde::{Deserialize, Serialize};
use tiny_keccak::{Hasher, Keccak};

/// The keccak256 hash of an event's canonical signature, stored as
/// lowercase 0x-prefixed hex. Used for O(1) signature lookup.
///
/// Hex case is normalized on construction so that topics supplied by RPC
/// nodes compare equal to hashes derived locally.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TopicHash(String);

impl TopicHash {
    pub fn as_hex(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TopicHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Compute the keccak256 topic hash of a canonical signature string.
/// Input: `"EventName(type1,type2,...)"`.
pub fn keccak256_signature(signature: &str) -> TopicHash {
    let mut hasher = Keccak::v256();
    let mut output = [0u8; 32];
    hasher.update(signature.as_bytes());
    hasher.finalize(&mut output);
    TopicHash(format!("0x{}", hex::encode(output)))
}

/// Extract the signature topic directly from a log's topic list (topics[0]).
/// Returns `None` if topics is empty or the first topic is not a 32-byte
/// hex word.
pub fn from_topics(topics: &[String]) -> Option<TopicHash> {
    let first = topics.first()?;
    let hex = first.strip_prefix("0x").unwrap_or(first);
    if hex.len() == 64 && hex.chars().all(|c| c.is_ascii_hexdigit()) {
        Some(TopicHash(format!("0x{}", hex.to_ascii_lowercase())))
    } else {
        None
    }
}

/// Decode a 32-byte topic word from its hex rendering.
pub fn decode_word(topic: &str) -> Option<[u8; 32]> {
    let hex = topic.strip_prefix("0x").unwrap_or(topic);
    if hex.len() != 64 {
        return None;
    }
    let bytes = hex::decode(hex).ok()?;
    let mut word = [0u8; 32];
    word.copy_from_slice(&bytes);
    Some(word)
}
