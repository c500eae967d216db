//! Typed cursor factory over a [`MemPool`].

use super::mapped::ByteMappedElement;
use super::mem_pool::{MemPool, SharedMemPool};
use super::storage::{new_storage, StorageKind};
use parking_lot::Mutex;
use std::sync::Arc;

/// A cursor type whose fields live in the slots of a [`Pool`].
///
/// Implementors are thin wrappers around a [`ByteMappedElement`] that read
/// and write their attributes at fixed byte offsets.
pub trait PoolObject: Sized + Send + 'static {
    /// Record size in bytes, header included.
    const SIZE_IN_BYTES: usize;

    fn from_access(access: ByteMappedElement) -> Self;

    fn access(&self) -> &ByteMappedElement;

    fn access_mut(&mut self) -> &mut ByteMappedElement;

    /// Reset the payload of a freshly allocated slot. Freed slots are
    /// handed out again with whatever bytes they held before.
    fn set_to_uninitialized_state(&self) {}

    #[inline]
    fn internal_pool_index(&self) -> usize {
        self.access().index()
    }
}

/// Id-based translation between cursors and a pool, usable as a trait
/// object by collections that only store ids.
pub trait RefPool<O>: Send + Sync {
    fn create_ref(&self) -> O;

    fn release_ref(&self, obj: O);

    /// Point `obj` at the entity with the given id.
    fn get_object_into<'a>(&self, id: i32, obj: &'a mut O) -> &'a mut O;

    fn get_id(&self, obj: &O) -> i32;
}

/// Typed pool of `O` records.
///
/// Two layers of reuse live here: freed slots are recycled by the
/// [`MemPool`], and released cursors wait in an idle queue until
/// [`Pool::create_ref`] hands them out again. The queue is guarded by a
/// mutex so scratch cursors can be borrowed from several threads; slot
/// contents are not protected beyond single reads and writes.
pub struct Pool<O: PoolObject> {
    mem: SharedMemPool,
    tmp_refs: Mutex<Vec<O>>,
}

impl<O: PoolObject> Pool<O> {
    pub fn new(initial_capacity: usize) -> Self {
        Self::with_storage(initial_capacity, StorageKind::SingleArray, super::DEFAULT_SLAB_BYTES)
    }

    pub fn with_storage(initial_capacity: usize, kind: StorageKind, slab_bytes: usize) -> Self {
        let storage = new_storage(kind, O::SIZE_IN_BYTES, initial_capacity, slab_bytes);
        Self {
            mem: MemPool::with_storage(storage).into_shared(),
            tmp_refs: Mutex::new(Vec::new()),
        }
    }

    pub fn mem_pool(&self) -> &SharedMemPool {
        &self.mem
    }

    /// A brand new cursor that does not point at any slot.
    pub fn create_empty_ref(&self) -> O {
        O::from_access(ByteMappedElement::new(self.mem.clone()))
    }

    /// A cursor from the idle queue, or a new one if the queue is empty.
    pub fn create_ref(&self) -> O {
        self.tmp_refs
            .lock()
            .pop()
            .unwrap_or_else(|| self.create_empty_ref())
    }

    /// Park `obj` in the idle queue. The slot it points at stays allocated.
    pub fn release_ref(&self, obj: O) {
        debug_assert!(
            Arc::ptr_eq(obj.access().mem_pool(), &self.mem),
            "cursor released into a foreign pool"
        );
        self.tmp_refs.lock().push(obj);
    }

    /// Scratch cursor for short internal use; return it with
    /// [`Pool::release_tmp_ref`].
    pub fn tmp_ref(&self) -> O {
        self.create_ref()
    }

    pub fn release_tmp_ref(&self, obj: O) {
        self.release_ref(obj);
    }

    /// Allocate a slot and point `obj` at it.
    pub fn create_into<'a>(&self, obj: &'a mut O) -> &'a mut O {
        let index = self.mem.write().create();
        obj.access_mut().set_index(index);
        obj.set_to_uninitialized_state();
        obj
    }

    /// Allocate a slot and return a cursor pointing at it.
    pub fn create(&self) -> O {
        let mut obj = self.create_ref();
        self.create_into(&mut obj);
        obj
    }

    /// Point `obj` at the slot with the given internal index.
    #[inline]
    pub fn get_into<'a>(&self, index: usize, obj: &'a mut O) -> &'a mut O {
        obj.access_mut().set_index(index);
        obj
    }

    pub fn get(&self, index: usize) -> O {
        let mut obj = self.create_ref();
        self.get_into(index, &mut obj);
        obj
    }

    /// Repoint `obj` at slot `index`.
    #[inline]
    pub fn update_access(&self, obj: &mut O, index: usize) {
        obj.access_mut().set_index(index);
    }

    /// Free the slot `obj` points at. The caller must already have removed
    /// every reference to it.
    pub fn delete(&self, obj: &O) {
        self.mem.write().free(obj.internal_pool_index());
    }

    pub fn size(&self) -> usize {
        self.mem.read().size()
    }

    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    pub fn is_allocated(&self, index: usize) -> bool {
        self.mem.read().is_allocated(index)
    }

    pub fn clear(&self) {
        self.mem.write().clear();
    }

    /// Iterate over allocated slots in index order.
    pub fn iter(&self) -> PoolIter<'_, O> {
        PoolIter {
            pool: self,
            next: 0,
        }
    }

    pub fn indices(&self) -> impl Iterator<Item = usize> + '_ {
        let mut iter = self.iter();
        std::iter::from_fn(move || iter.next_index())
    }
}

impl<O: PoolObject> RefPool<O> for Pool<O> {
    fn create_ref(&self) -> O {
        Pool::create_ref(self)
    }

    fn release_ref(&self, obj: O) {
        Pool::release_ref(self, obj)
    }

    fn get_object_into<'a>(&self, id: i32, obj: &'a mut O) -> &'a mut O {
        self.get_into(id as usize, obj)
    }

    fn get_id(&self, obj: &O) -> i32 {
        obj.internal_pool_index() as i32
    }
}

/// Iterator over the allocated slots of a [`Pool`].
///
/// As an [`Iterator`] it yields a cursor per slot; [`PoolIter::next_into`]
/// repoints a caller-owned cursor instead. Deleting the slot last returned
/// does not disturb iteration.
pub struct PoolIter<'a, O: PoolObject> {
    pool: &'a Pool<O>,
    next: usize,
}

impl<O: PoolObject> PoolIter<'_, O> {
    pub fn next_index(&mut self) -> Option<usize> {
        let index = self.pool.mem.read().next_allocated(self.next)?;
        self.next = index + 1;
        Some(index)
    }

    /// Point `obj` at the next allocated slot. Returns `false` when exhausted.
    pub fn next_into(&mut self, obj: &mut O) -> bool {
        match self.next_index() {
            Some(index) => {
                self.pool.get_into(index, obj);
                true
            }
            None => false,
        }
    }
}

impl<O: PoolObject> Iterator for PoolIter<'_, O> {
    type Item = O;

    fn next(&mut self) -> Option<O> {
        self.next_index().map(|index| self.pool.get(index))
    }
}
