//! First-sighting tracking for one live session.

use std::collections::HashSet;

use crate::{Detection, DetectionKey};

/// Insert-only set of `(symbology, payload)` pairs seen in one session.
///
/// A fresh deduplicator is created when a live session starts and dropped
/// when it ends; nothing is ever evicted in between.
#[derive(Debug, Default)]
pub struct SessionDeduplicator {
    seen: HashSet<DetectionKey>,
    order: Vec<DetectionKey>,
}

impl SessionDeduplicator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` exactly the first time this pair is observed.
    pub fn observe(&mut self, detection: &Detection) -> bool {
        let key = detection.key();
        if self.seen.contains(&key) {
            return false;
        }
        self.seen.insert(key.clone());
        self.order.push(key);
        true
    }

    /// Pairs in first-occurrence order.
    pub fn seen(&self) -> &[DetectionKey] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
