//! Slab allocator handing out stable slot indices.

use super::mapped::ByteMappedElement;
use super::storage::{new_storage, SlabStorage, StorageKind, DEFAULT_SLAB_BYTES};
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::{debug, trace};

/// A [`MemPool`] shared between its typed pool and every cursor pointing into it.
pub type SharedMemPool = Arc<RwLock<MemPool>>;

/// Fixed-size slot allocator with a LIFO free list.
///
/// Indices are stable: an allocated slot keeps its index until it is freed,
/// and growth never moves a slot to a different index. Freed slots keep
/// their bytes; callers reset whatever sentinels they rely on.
pub struct MemPool {
    storage: Box<dyn SlabStorage>,
    /// High-water mark: every index below it has been handed out at least once.
    size: usize,
    allocated: usize,
    free_list: Vec<usize>,
    occupied: Vec<bool>,
}

impl MemPool {
    pub fn new(kind: StorageKind, element_size: usize, capacity: usize) -> Self {
        Self::with_storage(new_storage(kind, element_size, capacity, DEFAULT_SLAB_BYTES))
    }

    pub fn with_storage(storage: Box<dyn SlabStorage>) -> Self {
        Self {
            storage,
            size: 0,
            allocated: 0,
            free_list: Vec::new(),
            occupied: Vec::new(),
        }
    }

    pub fn into_shared(self) -> SharedMemPool {
        Arc::new(RwLock::new(self))
    }

    /// Allocate a slot and return its index.
    ///
    /// The most recently freed slot is reused first. Without free slots the
    /// pool hands out the next unused index, doubling the backing storage
    /// when it is exhausted.
    pub fn create(&mut self) -> usize {
        self.allocated += 1;
        if let Some(index) = self.free_list.pop() {
            self.occupied[index] = true;
            return index;
        }

        let capacity = self.storage.capacity();
        if self.size == capacity {
            let new_capacity = (capacity * 2).max(1);
            trace!("Growing mem pool from {} to {} slots", capacity, new_capacity);
            self.storage.grow_to(new_capacity);
        }
        let index = self.size;
        self.size += 1;
        self.occupied.push(true);
        index
    }

    /// Return a slot to the free list. Does not touch the slot bytes.
    pub fn free(&mut self, index: usize) {
        debug_assert!(
            self.occupied.get(index).copied().unwrap_or(false),
            "double free or foreign index {}",
            index
        );
        if !std::mem::replace(&mut self.occupied[index], false) {
            return;
        }
        self.allocated -= 1;
        self.free_list.push(index);
    }

    /// Free every slot. Backing storage keeps its capacity.
    pub fn clear(&mut self) {
        debug!("Clearing mem pool with {} allocated slots", self.allocated);
        self.size = 0;
        self.allocated = 0;
        self.free_list.clear();
        self.occupied.clear();
    }

    /// Exchange the contents and allocation state of two slots.
    ///
    /// When exactly one of them is free, the free list follows the free
    /// state to its new index.
    pub fn swap(&mut self, i: usize, j: usize) {
        if i == j {
            return;
        }
        self.storage.swap(i, j);
        self.occupied.swap(i, j);
        let (was_free, now_free) = match (self.occupied[i], self.occupied[j]) {
            (true, false) => (i, j),
            (false, true) => (j, i),
            _ => return,
        };
        if let Some(entry) = self.free_list.iter_mut().find(|entry| **entry == was_free) {
            *entry = now_free;
        }
    }

    /// Repoint `element` at slot `index`.
    #[inline]
    pub fn update_access(&self, element: &mut ByteMappedElement, index: usize) {
        debug_assert!(index < self.storage.capacity());
        element.set_index(index);
    }

    /// Number of allocated slots.
    pub fn size(&self) -> usize {
        self.allocated
    }

    pub fn capacity(&self) -> usize {
        self.storage.capacity()
    }

    pub fn element_size(&self) -> usize {
        self.storage.element_size()
    }

    pub fn is_allocated(&self, index: usize) -> bool {
        self.occupied.get(index).copied().unwrap_or(false)
    }

    /// First allocated index at or after `from`.
    pub fn next_allocated(&self, from: usize) -> Option<usize> {
        (from..self.size).find(|&index| self.occupied[index])
    }

    #[inline]
    pub fn slot(&self, index: usize) -> &[u8] {
        self.storage.slot(index)
    }

    #[inline]
    pub fn slot_mut(&mut self, index: usize) -> &mut [u8] {
        self.storage.slot_mut(index)
    }
}

impl std::fmt::Debug for MemPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemPool")
            .field("element_size", &self.element_size())
            .field("capacity", &self.capacity())
            .field("allocated", &self.allocated)
            .field("free", &self.free_list.len())
            .finish()
    }
}
