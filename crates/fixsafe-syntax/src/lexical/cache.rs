//! Memoisation of classifier results.
//!
//! Entries are keyed by the buffer's length, a SHA-256 fingerprint of its
//! content and the queried offset, so two different buffers of equal length
//! never share entries. Clearing the cache only affects performance.

use std::num::NonZeroUsize;

use lru::LruCache;
use sha2::{Digest, Sha256};

use super::context::LexicalContext;

/// Default number of memoised classifications.
pub const DEFAULT_CACHE_CAPACITY: usize = 4096;

/// Content fingerprint of a buffer.
pub type Fingerprint = [u8; 32];

/// Computes the content fingerprint of `source`.
#[must_use]
pub fn fingerprint(source: &str) -> Fingerprint {
    Sha256::digest(source.as_bytes()).into()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct CacheKey {
    length: usize,
    fingerprint: Fingerprint,
    offset: usize,
}

/// Bounded least-recently-used cache of classifications.
#[derive(Debug)]
pub struct ClassifierCache {
    entries: LruCache<CacheKey, LexicalContext>,
}

impl ClassifierCache {
    /// Creates a cache holding at most `capacity` entries (minimum one).
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let bounded = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: LruCache::new(bounded),
        }
    }

    /// Returns the memoised classification, if present.
    pub fn get(
        &mut self,
        fingerprint: &Fingerprint,
        length: usize,
        offset: usize,
    ) -> Option<LexicalContext> {
        let key = CacheKey {
            length,
            fingerprint: *fingerprint,
            offset,
        };
        self.entries.get(&key).copied()
    }

    /// Stores a classification.
    pub fn insert(
        &mut self,
        fingerprint: &Fingerprint,
        length: usize,
        offset: usize,
        context: LexicalContext,
    ) {
        let key = CacheKey {
            length,
            fingerprint: *fingerprint,
            offset,
        };
        self.entries.put(key, context);
    }

    /// Drops every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of memoised classifications.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when nothing is memoised.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for ClassifierCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY)
    }
}
