//! Slot storage and cursor pools
//!
//! Entities live as fixed-size byte records inside a [`MemPool`]. A
//! [`Pool`] hands out [`PoolObject`] cursors that read and write those
//! records through a [`ByteMappedElement`] and can be repointed at any slot
//! without allocating.

pub mod byte_utils;
pub mod mapped;
pub mod mem_pool;
#[allow(clippy::module_inception)]
pub mod pool;
pub mod storage;

pub use mapped::{ByteMappedElement, MappedElement, NO_SLOT};
pub use mem_pool::{MemPool, SharedMemPool};
pub use pool::{Pool, PoolIter, PoolObject, RefPool};
pub use storage::{
    MultiArrayStorage, SingleArrayStorage, SlabStorage, StorageKind, DEFAULT_SLAB_BYTES,
};

/// Sentinel stored in index-valued fields that point nowhere.
pub const NO_INDEX: i32 = -1;

/// Encode a slot index for storage in an `i32` link field.
#[inline]
pub fn to_link(index: usize) -> i32 {
    debug_assert!(index <= i32::MAX as usize, "slot index {} overflows a link", index);
    index as i32
}

/// Decode an `i32` link field; negative values mean "no slot".
#[inline]
pub fn from_link(link: i32) -> Option<usize> {
    usize::try_from(link).ok()
}
