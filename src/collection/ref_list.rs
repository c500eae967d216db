use super::{object_for, RefIter};
use crate::pool::RefPool;
use std::cmp::Ordering;
use std::sync::Arc;

/// Growable list of pool objects.
pub struct RefList<O> {
    pool: Arc<dyn RefPool<O>>,
    ids: Vec<i32>,
}

impl<O> RefList<O> {
    pub fn new(pool: Arc<dyn RefPool<O>>) -> Self {
        Self::with_capacity(pool, 0)
    }

    pub fn with_capacity(pool: Arc<dyn RefPool<O>>, capacity: usize) -> Self {
        Self {
            pool,
            ids: Vec::with_capacity(capacity),
        }
    }

    pub fn create_ref(&self) -> O {
        self.pool.create_ref()
    }

    pub fn release_ref(&self, obj: O) {
        self.pool.release_ref(obj)
    }

    pub fn add(&mut self, obj: &O) {
        self.ids.push(self.pool.get_id(obj));
    }

    pub fn insert(&mut self, index: usize, obj: &O) {
        self.ids.insert(index, self.pool.get_id(obj));
    }

    pub fn add_all(&mut self, other: &RefList<O>) {
        self.ids.extend_from_slice(&other.ids);
    }

    /// Panics if `index` is out of bounds.
    pub fn get_into<'a>(&self, index: usize, obj: &'a mut O) -> &'a mut O {
        self.pool.get_object_into(self.ids[index], obj)
    }

    pub fn get(&self, index: usize) -> O {
        object_for(self.pool.as_ref(), self.ids[index])
    }

    /// Replace the element at `index`, pointing `replaced` at the old one.
    pub fn set_into<'a>(&mut self, index: usize, obj: &O, replaced: &'a mut O) -> &'a mut O {
        let old = std::mem::replace(&mut self.ids[index], self.pool.get_id(obj));
        self.pool.get_object_into(old, replaced)
    }

    pub fn set(&mut self, index: usize, obj: &O) -> O {
        let old = std::mem::replace(&mut self.ids[index], self.pool.get_id(obj));
        object_for(self.pool.as_ref(), old)
    }

    pub fn remove_into<'a>(&mut self, index: usize, obj: &'a mut O) -> &'a mut O {
        let id = self.ids.remove(index);
        self.pool.get_object_into(id, obj)
    }

    pub fn remove(&mut self, index: usize) -> O {
        let id = self.ids.remove(index);
        object_for(self.pool.as_ref(), id)
    }

    /// Remove the first occurrence of `obj`.
    pub fn remove_obj(&mut self, obj: &O) -> bool {
        match self.index_of(obj) {
            Some(index) => {
                self.ids.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, obj: &O) -> bool {
        self.index_of(obj).is_some()
    }

    pub fn index_of(&self, obj: &O) -> Option<usize> {
        let id = self.pool.get_id(obj);
        self.ids.iter().position(|&x| x == id)
    }

    pub fn swap(&mut self, i: usize, j: usize) {
        self.ids.swap(i, j);
    }

    pub fn reverse(&mut self) {
        self.ids.reverse();
    }

    /// Stable sort comparing objects through two reused cursors.
    pub fn sort_by<F>(&mut self, mut compare: F)
    where
        F: FnMut(&O, &O) -> Ordering,
    {
        let pool = self.pool.as_ref();
        let mut a = pool.create_ref();
        let mut b = pool.create_ref();
        self.ids.sort_by(|&x, &y| {
            pool.get_object_into(x, &mut a);
            pool.get_object_into(y, &mut b);
            compare(&a, &b)
        });
        pool.release_ref(b);
        pool.release_ref(a);
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

    pub fn ids(&self) -> &[i32] {
        &self.ids
    }

    pub fn iter(&self) -> RefIter<'_, O, std::iter::Copied<std::slice::Iter<'_, i32>>> {
        RefIter::new(self.pool.as_ref(), self.ids.iter().copied())
    }
}

impl<O> std::fmt::Debug for RefList<O> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(&self.ids).finish()
    }
}
