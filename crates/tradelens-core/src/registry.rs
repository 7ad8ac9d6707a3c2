//! In-memory signature registry.
//!
//! The registry is built once at startup, then shared read-only (wrap it in
//! an `Arc` to share across concurrent lookups). There is no interior
//! mutability: construction and use are separate phases.

use crate::signature::{builtin, EventSignature};
use crate::topic::TopicHash;
use std::collections::HashMap;

/// Holds known event signatures keyed by their canonical topic hash.
#[derive(Debug, Clone, Default)]
pub struct SignatureRegistry {
    by_topic: HashMap<TopicHash, EventSignature>,
    /// Topics in registration order, for stable listings.
    order: Vec<TopicHash>,
}

impl SignatureRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry preloaded with the application's built-in signatures.
    pub fn with_builtin() -> Self {
        let mut reg = Self::new();
        for sig in builtin::all() {
            reg.register(sig);
        }
        reg
    }

    /// Register a signature and return its topic hash.
    /// Re-registering the same topic replaces the previous entry.
    pub fn register(&mut self, signature: EventSignature) -> TopicHash {
        let topic = signature.topic().clone();
        if self.by_topic.insert(topic.clone(), signature).is_none() {
            self.order.push(topic.clone());
        }
        topic
    }

    /// Look up a signature by topic hash.
    pub fn lookup(&self, topic: &TopicHash) -> Option<&EventSignature> {
        self.by_topic.get(topic)
    }

    /// Returns `true` if the topic hash is registered.
    pub fn contains(&self, topic: &TopicHash) -> bool {
        self.by_topic.contains_key(topic)
    }

    /// All registered signatures, in registration order.
    pub fn signatures(&self) -> impl Iterator<Item = &EventSignature> {
        self.order.iter().filter_map(|t| self.by_topic.get(t))
    }

    pub fn len(&self) -> usize {
        self.by_topic.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_topic.is_empty()
    }
}
