use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use crate::error::PoolError;

/// A draw from a [`ContentPool`]: the slot in the remaining pool and the
/// item's index in the full collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Drawn {
    slot: usize,
    index: usize,
}

impl Drawn {
    /// Index of the drawn item in the full collection.
    pub fn index(&self) -> usize {
        self.index
    }
}

/// Samples items without replacement, refilling from the full collection
/// once every item has been consumed.
#[derive(Debug, Clone)]
pub struct ContentPool<T, R = StdRng> {
    items: Vec<T>,
    remaining: Vec<usize>,
    rng: R,
}

impl<T> ContentPool<T, StdRng> {
    pub fn new(items: Vec<T>) -> Self {
        Self::with_rng(items, StdRng::from_os_rng())
    }

    pub fn seeded(items: Vec<T>, seed: u64) -> Self {
        Self::with_rng(items, StdRng::seed_from_u64(seed))
    }
}

impl<T, R: Rng> ContentPool<T, R> {
    pub fn with_rng(items: Vec<T>, rng: R) -> Self {
        let remaining = (0..items.len()).collect();
        ContentPool {
            items,
            remaining,
            rng,
        }
    }

    /// Pick uniformly from the remaining items, refilling first if the
    /// current cycle is used up. The item stays in the pool until
    /// [`consume`](Self::consume) is called.
    pub fn draw(&mut self) -> Result<Drawn, PoolError> {
        if self.items.is_empty() {
            return Err(PoolError::Empty);
        }
        if self.remaining.is_empty() {
            self.refill();
        }
        let slot = self.rng.random_range(0..self.remaining.len());
        let drawn = Drawn {
            slot,
            index: self.remaining[slot],
        };
        debug!(index = drawn.index, remaining = self.remaining.len(), "drew item");
        Ok(drawn)
    }

    /// Remove a drawn item from the current cycle. Returns false if the draw
    /// no longer matches the pool (e.g. it was refilled in between).
    pub fn consume(&mut self, drawn: Drawn) -> bool {
        if self.remaining.get(drawn.slot) != Some(&drawn.index) {
            return false;
        }
        self.remaining.remove(drawn.slot);
        true
    }

    pub fn get(&self, drawn: Drawn) -> Option<&T> {
        self.items.get(drawn.index)
    }

    /// Restore every item to the current cycle.
    pub fn refill(&mut self) {
        self.remaining = (0..self.items.len()).collect();
        info!(size = self.items.len(), "content pool refilled");
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn remaining(&self) -> usize {
        self.remaining.len()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_empty_pool_errors() {
        let mut pool: ContentPool<&str> = ContentPool::seeded(Vec::new(), 1);
        assert_eq!(pool.draw(), Err(PoolError::Empty));
    }

    #[test]
    fn test_cycle_visits_every_item_once() {
        let items: Vec<u32> = (0..25).collect();
        let mut pool = ContentPool::seeded(items, 42);
        let mut seen = HashSet::new();

        for _ in 0..25 {
            let drawn = pool.draw().unwrap();
            assert!(seen.insert(*pool.get(drawn).unwrap()), "repeat within cycle");
            assert!(pool.consume(drawn));
        }
        assert_eq!(seen.len(), 25);
        assert_eq!(pool.remaining(), 0);
    }

    #[test]
    fn test_refills_after_exhaustion() {
        let mut pool = ContentPool::seeded(vec!["a", "b"], 7);
        for _ in 0..2 {
            let drawn = pool.draw().unwrap();
            pool.consume(drawn);
        }
        assert_eq!(pool.remaining(), 0);

        let drawn = pool.draw().unwrap();
        assert_eq!(pool.remaining(), 2);
        assert!(pool.consume(drawn));
        assert_eq!(pool.remaining(), 1);
    }

    #[test]
    fn test_draw_without_consume_keeps_item() {
        let mut pool = ContentPool::seeded(vec![1, 2, 3], 3);
        pool.draw().unwrap();
        pool.draw().unwrap();
        assert_eq!(pool.remaining(), 3);
    }

    #[test]
    fn test_duplicates_consumed_by_position() {
        let mut pool = ContentPool::seeded(vec!["same", "same", "same"], 9);
        let drawn = pool.draw().unwrap();
        assert!(pool.consume(drawn));
        assert_eq!(pool.remaining(), 2);
    }

    #[test]
    fn test_stale_draw_is_rejected() {
        let mut pool = ContentPool::seeded(vec![10, 20, 30], 5);
        let drawn = pool.draw().unwrap();
        assert!(pool.consume(drawn));
        assert!(!pool.consume(drawn));
        assert_eq!(pool.remaining(), 2);
        pool.refill();
        assert_eq!(pool.remaining(), 3);
    }

    #[test]
    fn test_seeded_pools_are_reproducible() {
        let mut a = ContentPool::seeded((0..50).collect::<Vec<u32>>(), 11);
        let mut b = ContentPool::seeded((0..50).collect::<Vec<u32>>(), 11);
        for _ in 0..50 {
            let da = a.draw().unwrap();
            let db = b.draw().unwrap();
            assert_eq!(da, db);
            a.consume(da);
            b.consume(db);
        }
    }
}
