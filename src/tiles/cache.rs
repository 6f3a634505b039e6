use super::TileCoord;
use lru::LruCache;
use std::num::NonZeroUsize;

/// Tiles kept by default; a 1080p view at one zoom needs about 40
pub const DEFAULT_TILE_CAPACITY: usize = 256;

/// Per-tile store with least-recently-used eviction
pub struct TileCache<T> {
    entries: LruCache<TileCoord, T>,
}

impl<T> TileCache<T> {
    /// A zero capacity is treated as one
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: LruCache::new(capacity),
        }
    }

    /// Looks a tile up and marks it recently used
    pub fn get(&mut self, coord: &TileCoord) -> Option<&T> {
        self.entries.get(coord)
    }

    /// Stores a tile, returning the entry evicted to make room, if any
    pub fn insert(&mut self, coord: TileCoord, value: T) -> Option<(TileCoord, T)> {
        self.entries.push(coord, value).filter(|(evicted, _)| *evicted != coord)
    }

    pub fn contains(&self, coord: &TileCoord) -> bool {
        self.entries.contains(coord)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.entries.cap().get()
    }
}

impl<T> Default for TileCache<T> {
    fn default() -> Self {
        Self::new(DEFAULT_TILE_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_evicts_least_recently_used() {
        let mut cache = TileCache::new(2);
        let (a, b, c) = (
            TileCoord::new(0, 0, 1),
            TileCoord::new(1, 0, 1),
            TileCoord::new(0, 1, 1),
        );
        assert!(cache.insert(a, "a").is_none());
        assert!(cache.insert(b, "b").is_none());
        assert_eq!(cache.get(&a), Some(&"a"));

        assert_eq!(cache.insert(c, "c"), Some((b, "b")));
        assert!(cache.contains(&a));
        assert!(!cache.contains(&b));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_replacing_is_not_eviction() {
        let mut cache = TileCache::new(1);
        let coord = TileCoord::new(3, 4, 5);
        cache.insert(coord, 1);
        assert!(cache.insert(coord, 2).is_none());
        assert_eq!(cache.get(&coord), Some(&2));
    }

    #[test]
    fn test_zero_capacity() {
        let mut cache: TileCache<u8> = TileCache::new(0);
        assert_eq!(cache.capacity(), 1);
        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(TileCache::<u8>::default().capacity(), DEFAULT_TILE_CAPACITY);
    }
}
