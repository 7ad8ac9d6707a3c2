//! # tradelens-evm
//!
//! EVM log decoding engine: log matching, field decoding, and value
//! normalization over `tradelens-core` signatures.
//!
//! ## Implementation notes
//! - Uses `alloy-core` for the generic ABI decode path
//! - Topics[0] → event signature topic (keccak256)
//! - Topics[1..] → indexed parameters (each one 32-byte word)
//! - `data` → non-indexed parameters (ABI-encoded tuple of words)
//! - Order-fill logs bypass the ABI library entirely and are decoded
//!   word-by-word against an exact topic match

pub mod decoder;
pub mod normalizer;

pub use decoder::{DecodeOutcome, DecodeRoute, LogDecoder, MatchResult};
