//! Mating pool for fitness-proportional parent selection.
//!
//! Weights are never stored. A candidate index is inserted once per fitness
//! point it earned, so a uniform draw over the occupied entries samples
//! candidates in proportion to their fitness. Storage is reserved once and
//! reused across generations.

use super::rng::SymbolRng;

/// Bounded multiset of candidate indices.
#[derive(Debug, Clone)]
pub struct MatingPool {
    entries: Vec<usize>,
    capacity: usize,
}

impl MatingPool {
    /// Reserve storage for `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Result<Self, PoolError> {
        let mut entries = Vec::new();
        entries
            .try_reserve_exact(capacity)
            .map_err(|_| PoolError::Allocation { capacity })?;

        Ok(Self { entries, capacity })
    }

    /// Append one occurrence of `index`.
    pub fn insert(&mut self, index: usize) -> Result<(), PoolError> {
        if self.is_full() {
            return Err(PoolError::Full {
                capacity: self.capacity,
            });
        }
        self.entries.push(index);
        Ok(())
    }

    /// Append `weight` occurrences of `index`.
    ///
    /// Either all occurrences fit or none are inserted.
    pub fn insert_weighted(&mut self, index: usize, weight: usize) -> Result<(), PoolError> {
        if weight > self.capacity - self.entries.len() {
            return Err(PoolError::Full {
                capacity: self.capacity,
            });
        }
        self.entries.extend(std::iter::repeat_n(index, weight));
        Ok(())
    }

    /// Drop all entries, keeping the storage.
    #[inline]
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.entries.len() == self.capacity
    }

    /// Draw an entry uniformly at random.
    pub fn draw(&self, rng: &mut SymbolRng) -> Result<usize, PoolError> {
        if self.is_empty() {
            return Err(PoolError::Empty);
        }
        Ok(self.draw_unchecked(rng))
    }

    /// Draw without the emptiness check.
    ///
    /// Callers must have established that the pool is non-empty; an empty
    /// pool panics on the index (or on the debug assertion).
    #[inline]
    pub(crate) fn draw_unchecked(&self, rng: &mut SymbolRng) -> usize {
        debug_assert!(!self.is_empty(), "draw from an empty mating pool");
        self.entries[rng.index(self.entries.len())]
    }
}

/// Mating pool precondition violations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PoolError {
    #[error("Mating pool is full (capacity {capacity})")]
    Full { capacity: usize },
    #[error("Cannot draw from an empty mating pool")]
    Empty,
    #[error("Failed to allocate mating pool with capacity {capacity}")]
    Allocation { capacity: usize },
}
