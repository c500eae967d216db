//! Collections of pool objects stored by id
//!
//! These hold `i32` pool ids instead of cursors and hand cursors back on
//! demand. Reads that produce an object come in two flavors: a plain method
//! that takes a cursor from the pool's idle queue, and an `_into` variant
//! that repoints a cursor supplied by the caller.

mod ref_deque;
mod ref_list;
mod ref_maps;
mod ref_set;

pub use ref_deque::{RefDeque, RefStack};
pub use ref_list::RefList;
pub use ref_maps::{IntRefMap, RefDoubleMap, RefIntMap, RefPrimitiveMap, RefRefMap};
pub use ref_set::RefSet;

use crate::pool::RefPool;

/// Iterator turning a sequence of ids into cursors.
pub struct RefIter<'a, O, I> {
    pool: &'a dyn RefPool<O>,
    ids: I,
}

impl<'a, O, I> RefIter<'a, O, I> {
    pub(crate) fn new(pool: &'a dyn RefPool<O>, ids: I) -> Self {
        Self { pool, ids }
    }
}

impl<O, I: Iterator<Item = i32>> Iterator for RefIter<'_, O, I> {
    type Item = O;

    fn next(&mut self) -> Option<O> {
        let id = self.ids.next()?;
        let mut obj = self.pool.create_ref();
        self.pool.get_object_into(id, &mut obj);
        Some(obj)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.ids.size_hint()
    }
}

/// Cursor from `pool` pointed at `id`.
pub(crate) fn object_for<O>(pool: &dyn RefPool<O>, id: i32) -> O {
    let mut obj = pool.create_ref();
    pool.get_object_into(id, &mut obj);
    obj
}
