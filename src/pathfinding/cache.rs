//! Bounded cache of raw tile paths

use std::collections::VecDeque;

use ahash::AHashMap;

use crate::core::types::{MobilityClass, TileCoord};

/// Identity of a path request after goal substitution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub start: TileCoord,
    pub goal: TileCoord,
    pub mobility: MobilityClass,
}

/// Fixed-capacity path cache.
///
/// Eviction is FIFO by insertion order, not LRU: a hit does not refresh an
/// entry's position.
#[derive(Debug, Clone)]
pub struct PathCache {
    capacity: usize,
    entries: AHashMap<CacheKey, Vec<TileCoord>>,
    order: VecDeque<CacheKey>,
}

impl PathCache {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            entries: AHashMap::with_capacity(capacity),
            order: VecDeque::with_capacity(capacity),
        }
    }

    pub fn get(&self, key: &CacheKey) -> Option<&[TileCoord]> {
        self.entries.get(key).map(Vec::as_slice)
    }

    pub fn contains(&self, key: &CacheKey) -> bool {
        self.entries.contains_key(key)
    }

    /// Store a path, returning the key evicted to make room (if any).
    ///
    /// Re-inserting an existing key replaces its path in place without
    /// moving it in the eviction order.
    pub fn insert(&mut self, key: CacheKey, path: Vec<TileCoord>) -> Option<CacheKey> {
        if let Some(existing) = self.entries.get_mut(&key) {
            *existing = path;
            return None;
        }

        let evicted = if self.entries.len() >= self.capacity {
            let oldest = self.order.pop_front();
            if let Some(oldest) = &oldest {
                self.entries.remove(oldest);
            }
            oldest
        } else {
            None
        };

        self.entries.insert(key, path);
        self.order.push_back(key);
        evicted
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
