//! LRU cache of parsed template trees.
//!
//! Keyed by `(kind, assembled text)`: the same text parsed under two kinds
//! goes through different wrappers and extraction paths, so it is a
//! different entry. Entries are shared read-only behind `Arc`; callers that
//! need a mutable tree detach a clone first.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};

use rustc_hash::FxHashMap;
use tracing::{debug, trace};

use crate::error::TemplateError;
use crate::node::{SyntaxNode, TemplateKind};
use crate::parse::parse_template;

/// Default number of cached templates.
pub const DEFAULT_CAPACITY: usize = 200;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    kind: TemplateKind,
    source: String,
}

/// Hit/miss counters, mostly useful for asserting that a cache hit did not
/// re-run the parser.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
}

#[derive(Debug, Default)]
struct Inner {
    entries: FxHashMap<CacheKey, Arc<SyntaxNode>>,
    /// Recency order, least recently used at the front. Both hits and
    /// inserts count as use.
    order: VecDeque<CacheKey>,
    stats: CacheStats,
}

impl Inner {
    fn touch(&mut self, key: &CacheKey) {
        if let Some(pos) = self.order.iter().position(|k| k == key) {
            self.order.remove(pos);
        }
        self.order.push_back(key.clone());
    }
}

/// Bounded store of parsed template trees.
///
/// One mutex serializes every access; parse cost dwarfs lock contention.
/// The parse itself runs outside the lock, and when two threads race to
/// insert the same key the first inserted tree wins and the loser's parse
/// result is discarded.
#[derive(Debug)]
pub struct SourceCache {
    capacity: usize,
    inner: Mutex<Inner>,
}

impl Default for SourceCache {
    fn default() -> Self {
        Self::new()
    }
}

impl SourceCache {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            inner: Mutex::new(Inner::default()),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the cached tree for `(kind, source)`, parsing on a miss.
    ///
    /// A parse failure propagates to the caller and leaves no entry behind.
    pub fn get_or_parse(
        &self,
        kind: TemplateKind,
        source: &str,
    ) -> Result<Arc<SyntaxNode>, TemplateError> {
        {
            let mut inner = self.lock();
            let key = CacheKey {
                kind,
                source: source.to_string(),
            };
            if let Some(tree) = inner.entries.get(&key).cloned() {
                inner.stats.hits += 1;
                inner.touch(&key);
                trace!(%kind, "template cache hit");
                return Ok(tree);
            }
        }

        let parsed = Arc::new(parse_template(kind, source)?);

        let mut inner = self.lock();
        let key = CacheKey {
            kind,
            source: source.to_string(),
        };
        // Another thread may have parsed and inserted the same key while we
        // were parsing; its tree stays, ours is dropped.
        if let Some(existing) = inner.entries.get(&key).cloned() {
            inner.stats.hits += 1;
            inner.touch(&key);
            return Ok(existing);
        }

        inner.stats.misses += 1;
        if inner.entries.len() >= self.capacity
            && let Some(evicted) = inner.order.pop_front()
        {
            inner.entries.remove(&evicted);
            debug!(kind = %evicted.kind, "evicted least recently used template");
        }
        inner.entries.insert(key.clone(), Arc::clone(&parsed));
        inner.touch(&key);
        debug!(%kind, entries = inner.entries.len(), "cached parsed template");
        Ok(parsed)
    }

    /// Whether an entry exists, without touching recency order.
    pub fn contains(&self, kind: TemplateKind, source: &str) -> bool {
        let inner = self.lock();
        inner.entries.contains_key(&CacheKey {
            kind,
            source: source.to_string(),
        })
    }

    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().entries.is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        self.lock().stats
    }

    /// Drops every entry. Generators built earlier stay valid; they re-fetch
    /// by key and simply pay one re-parse each.
    pub fn clear(&self) {
        let mut inner = self.lock();
        inner.entries.clear();
        inner.order.clear();
        debug!("template cache cleared");
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KIND: TemplateKind = TemplateKind::Expression;

    #[test]
    fn hit_does_not_reparse() {
        let cache = SourceCache::new();
        let first = cache.get_or_parse(KIND, "1 + 2").unwrap();
        let second = cache.get_or_parse(KIND, "1 + 2").unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.stats(), CacheStats { hits: 1, misses: 1 });
    }

    #[test]
    fn kind_is_part_of_the_key() {
        let cache = SourceCache::new();
        cache.get_or_parse(TemplateKind::Expression, "a").unwrap();
        cache.get_or_parse(TemplateKind::Statement, "a").unwrap();
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn evicts_least_recently_used_at_capacity() {
        let cache = SourceCache::with_capacity(2);
        cache.get_or_parse(KIND, "1").unwrap();
        cache.get_or_parse(KIND, "2").unwrap();
        cache.get_or_parse(KIND, "3").unwrap();

        assert_eq!(cache.len(), 2);
        assert!(!cache.contains(KIND, "1"));
        assert!(cache.contains(KIND, "2"));
        assert!(cache.contains(KIND, "3"));
    }

    #[test]
    fn get_counts_as_use_for_recency() {
        let cache = SourceCache::with_capacity(2);
        cache.get_or_parse(KIND, "1").unwrap();
        cache.get_or_parse(KIND, "2").unwrap();
        // Touch "1" so "2" becomes the eviction candidate.
        cache.get_or_parse(KIND, "1").unwrap();
        cache.get_or_parse(KIND, "3").unwrap();

        assert!(cache.contains(KIND, "1"));
        assert!(!cache.contains(KIND, "2"));
        assert!(cache.contains(KIND, "3"));
    }

    #[test]
    fn failed_parse_is_not_cached() {
        let cache = SourceCache::new();
        assert!(cache.get_or_parse(KIND, "((").is_err());
        assert!(cache.is_empty());
        assert!(cache.get_or_parse(KIND, "((").is_err());
        assert_eq!(cache.stats(), CacheStats::default());
    }

    #[test]
    fn clear_empties_the_cache() {
        let cache = SourceCache::new();
        cache.get_or_parse(KIND, "1").unwrap();
        cache.clear();
        assert!(cache.is_empty());
        // Still usable afterwards.
        cache.get_or_parse(KIND, "1").unwrap();
        assert_eq!(cache.len(), 1);
    }
}
