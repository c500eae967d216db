use super::{object_for, RefIter};
use crate::pool::RefPool;
use indexmap::IndexSet;
use rustc_hash::FxBuildHasher;
use std::sync::Arc;

/// Set of pool objects.
///
/// Iterates in insertion order until the first removal; removal moves the
/// last element into the freed position.
pub struct RefSet<O> {
    pool: Arc<dyn RefPool<O>>,
    ids: IndexSet<i32, FxBuildHasher>,
}

impl<O> RefSet<O> {
    pub fn new(pool: Arc<dyn RefPool<O>>) -> Self {
        Self::with_capacity(pool, 0)
    }

    pub fn with_capacity(pool: Arc<dyn RefPool<O>>, capacity: usize) -> Self {
        Self {
            pool,
            ids: IndexSet::with_capacity_and_hasher(capacity, FxBuildHasher),
        }
    }

    pub fn create_ref(&self) -> O {
        self.pool.create_ref()
    }

    pub fn release_ref(&self, obj: O) {
        self.pool.release_ref(obj)
    }

    /// Returns `true` if `obj` was not present.
    pub fn insert(&mut self, obj: &O) -> bool {
        self.ids.insert(self.pool.get_id(obj))
    }

    pub fn insert_all(&mut self, other: &RefSet<O>) {
        self.ids.extend(other.ids.iter().copied());
    }

    /// Returns `true` if `obj` was present.
    pub fn remove(&mut self, obj: &O) -> bool {
        self.ids.swap_remove(&self.pool.get_id(obj))
    }

    pub fn contains(&self, obj: &O) -> bool {
        self.ids.contains(&self.pool.get_id(obj))
    }

    pub fn contains_id(&self, id: i32) -> bool {
        self.ids.contains(&id)
    }

    /// Remove some element and point `obj` at it.
    pub fn pop_into<'a>(&mut self, obj: &'a mut O) -> Option<&'a mut O> {
        let id = self.ids.pop()?;
        Some(self.pool.get_object_into(id, obj))
    }

    pub fn pop(&mut self) -> Option<O> {
        let id = self.ids.pop()?;
        Some(object_for(self.pool.as_ref(), id))
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn ids(&self) -> impl Iterator<Item = i32> + '_ {
        self.ids.iter().copied()
    }

    pub fn iter(&self) -> RefIter<'_, O, std::iter::Copied<indexmap::set::Iter<'_, i32>>> {
        RefIter::new(self.pool.as_ref(), self.ids.iter().copied())
    }
}

impl<O> std::fmt::Debug for RefSet<O> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(&self.ids).finish()
    }
}
