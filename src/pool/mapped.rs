//! Windows onto a single slot of a [`MemPool`](super::MemPool).

use super::byte_utils;
use super::mem_pool::SharedMemPool;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Index of a cursor that has not been pointed at any slot yet.
pub const NO_SLOT: usize = usize::MAX;

/// Typed access to the bytes of one fixed-size record, addressed by byte
/// offset within the record.
pub trait MappedElement {
    fn get_byte(&self, offset: usize) -> u8;
    fn put_byte(&self, offset: usize, value: u8);
    fn get_boolean(&self, offset: usize) -> bool;
    fn put_boolean(&self, offset: usize, value: bool);
    fn get_int(&self, offset: usize) -> i32;
    fn put_int(&self, offset: usize, value: i32);
    fn get_float(&self, offset: usize) -> f32;
    fn put_float(&self, offset: usize, value: f32);
    fn get_long(&self, offset: usize) -> i64;
    fn put_long(&self, offset: usize, value: i64);
    fn get_double(&self, offset: usize) -> f64;
    fn put_double(&self, offset: usize, value: f64);

    /// Copy `dst.len()` bytes starting at `offset` out of the record.
    fn read_bytes(&self, offset: usize, dst: &mut [u8]);

    /// Copy `src` into the record starting at `offset`.
    fn write_bytes(&self, offset: usize, src: &[u8]);
}

/// Cursor over one slot of a shared [`MemPool`](super::MemPool).
///
/// Holds the pool handle and a slot index; every accessor takes the pool
/// lock for the duration of that single read or write. Repointing only
/// overwrites the index.
///
/// Two elements are equal when they point at the same slot of the same
/// pool, regardless of which cursor object they are.
#[derive(Clone)]
pub struct ByteMappedElement {
    pool: SharedMemPool,
    index: usize,
}

impl ByteMappedElement {
    /// A cursor into `pool` that does not point at any slot yet.
    pub fn new(pool: SharedMemPool) -> Self {
        Self {
            pool,
            index: NO_SLOT,
        }
    }

    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    #[inline]
    pub fn set_index(&mut self, index: usize) {
        self.index = index;
    }

    pub fn is_pointed(&self) -> bool {
        self.index != NO_SLOT
    }

    pub fn mem_pool(&self) -> &SharedMemPool {
        &self.pool
    }

    #[inline]
    fn read<R>(&self, f: impl FnOnce(&[u8]) -> R) -> R {
        debug_assert!(self.is_pointed(), "cursor is not pointed at a slot");
        let pool = self.pool.read();
        f(pool.slot(self.index))
    }

    #[inline]
    fn write(&self, f: impl FnOnce(&mut [u8])) {
        debug_assert!(self.is_pointed(), "cursor is not pointed at a slot");
        let mut pool = self.pool.write();
        f(pool.slot_mut(self.index))
    }
}

impl MappedElement for ByteMappedElement {
    fn get_byte(&self, offset: usize) -> u8 {
        self.read(|slot| byte_utils::get_byte(slot, offset))
    }

    fn put_byte(&self, offset: usize, value: u8) {
        self.write(|slot| byte_utils::put_byte(slot, offset, value))
    }

    fn get_boolean(&self, offset: usize) -> bool {
        self.read(|slot| byte_utils::get_boolean(slot, offset))
    }

    fn put_boolean(&self, offset: usize, value: bool) {
        self.write(|slot| byte_utils::put_boolean(slot, offset, value))
    }

    fn get_int(&self, offset: usize) -> i32 {
        self.read(|slot| byte_utils::get_int(slot, offset))
    }

    fn put_int(&self, offset: usize, value: i32) {
        self.write(|slot| byte_utils::put_int(slot, offset, value))
    }

    fn get_float(&self, offset: usize) -> f32 {
        self.read(|slot| byte_utils::get_float(slot, offset))
    }

    fn put_float(&self, offset: usize, value: f32) {
        self.write(|slot| byte_utils::put_float(slot, offset, value))
    }

    fn get_long(&self, offset: usize) -> i64 {
        self.read(|slot| byte_utils::get_long(slot, offset))
    }

    fn put_long(&self, offset: usize, value: i64) {
        self.write(|slot| byte_utils::put_long(slot, offset, value))
    }

    fn get_double(&self, offset: usize) -> f64 {
        self.read(|slot| byte_utils::get_double(slot, offset))
    }

    fn put_double(&self, offset: usize, value: f64) {
        self.write(|slot| byte_utils::put_double(slot, offset, value))
    }

    fn read_bytes(&self, offset: usize, dst: &mut [u8]) {
        self.read(|slot| dst.copy_from_slice(&slot[offset..offset + dst.len()]))
    }

    fn write_bytes(&self, offset: usize, src: &[u8]) {
        self.write(|slot| slot[offset..offset + src.len()].copy_from_slice(src))
    }
}

impl PartialEq for ByteMappedElement {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index && Arc::ptr_eq(&self.pool, &other.pool)
    }
}

impl Eq for ByteMappedElement {}

impl Hash for ByteMappedElement {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.index.hash(state);
    }
}

impl std::fmt::Debug for ByteMappedElement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_pointed() {
            write!(f, "ByteMappedElement({})", self.index)
        } else {
            f.write_str("ByteMappedElement(unpointed)")
        }
    }
}
