//! # tradelens-core
//!
//! Signature registry, topic hashing, and normalized event records for the
//! TradeLens decode pipeline. The EVM field decoder and the receipt client
//! are built on top of the types defined here.

pub mod error;
pub mod event;
pub mod normalize;
pub mod registry;
pub mod signature;
pub mod topic;
pub mod types;

pub use error::DecodeError;
pub use event::{DecodedEvent, OrderFill, RawLog, SingleTransfer, TokenApproval, TokenTransfer};
pub use registry::SignatureRegistry;
pub use signature::{EventParam, EventSignature};
pub use topic::TopicHash;
pub use types::{FieldMap, FieldValue, ParamType};
