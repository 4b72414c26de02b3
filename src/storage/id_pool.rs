//! Student identifier allocation.
//!
//! Identifiers are minted from a counter starting at 1. Identifiers released
//! by deletions go into a recycle pool and are handed out again, smallest
//! first, before any new identifier is minted.

use std::collections::BTreeSet;

use crate::domain::StudentId;

/// Allocates and recycles [`StudentId`]s for a single store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdPool {
    next: StudentId,
    recycled: BTreeSet<StudentId>,
}

impl Default for IdPool {
    fn default() -> Self {
        Self {
            next: StudentId::FIRST,
            recycled: BTreeSet::new(),
        }
    }
}

impl IdPool {
    /// Returns the smallest recycled identifier, or mints a new one.
    ///
    /// # Panics
    ///
    /// Panics if the identifier space is exhausted.
    pub fn allocate(&mut self) -> StudentId {
        if let Some(id) = self.recycled.pop_first() {
            return id;
        }
        let id = self.next;
        self.next = id.checked_next().expect("student ID overflow!");
        id
    }

    /// Returns an identifier to the pool for reuse.
    ///
    /// Releasing an identifier that is already in the pool has no effect.
    pub fn release(&mut self, id: StudentId) {
        debug_assert!(id < self.next, "released ID {id} was never allocated");
        self.recycled.insert(id);
    }

    /// The identifier that will be minted once the recycle pool is empty.
    #[must_use]
    pub const fn next_unused(&self) -> StudentId {
        self.next
    }

    /// The identifiers waiting to be reused, in ascending order.
    pub fn recycled(&self) -> impl Iterator<Item = StudentId> + '_ {
        self.recycled.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(n: usize) -> StudentId {
        StudentId::try_from(n).unwrap()
    }

    #[test]
    fn fresh_pool_counts_from_one() {
        let mut pool = IdPool::default();
        let ids: Vec<_> = (0..3).map(|_| pool.allocate().get()).collect();
        assert_eq!(ids, [1, 2, 3]);
    }

    #[test]
    fn released_ids_are_reused_smallest_first() {
        let mut pool = IdPool::default();
        for _ in 0..5 {
            pool.allocate();
        }

        pool.release(id(4));
        pool.release(id(2));

        assert_eq!(pool.recycled().collect::<Vec<_>>(), [id(2), id(4)]);
        assert_eq!(pool.allocate(), id(2));
        assert_eq!(pool.allocate(), id(4));
        assert_eq!(pool.allocate(), id(6));
    }

    #[test]
    fn pools_are_independent() {
        let mut first = IdPool::default();
        let mut second = IdPool::default();

        first.allocate();
        first.allocate();

        assert_eq!(second.allocate(), id(1));
        assert_eq!(first.next_unused(), id(3));
    }
}
