//! Edge record header.
//!
//! An edge stores its endpoints as vertex slot indices and threads itself
//! into two intrusive lists: the source's outgoing list through
//! `next_source_edge_index` and the target's incoming list through
//! `next_target_edge_index`. Both are `-1` terminated.

use crate::pool::byte_utils::INT_SIZE;
use crate::pool::{MappedElement, PoolObject};

pub const SOURCE_INDEX_OFFSET: usize = 0;
pub const TARGET_INDEX_OFFSET: usize = SOURCE_INDEX_OFFSET + INT_SIZE;
pub const NEXT_SOURCE_EDGE_INDEX_OFFSET: usize = TARGET_INDEX_OFFSET + INT_SIZE;
pub const NEXT_TARGET_EDGE_INDEX_OFFSET: usize = NEXT_SOURCE_EDGE_INDEX_OFFSET + INT_SIZE;
pub const EDGE_HEADER_SIZE: usize = NEXT_TARGET_EDGE_INDEX_OFFSET + INT_SIZE;

/// A pool object carrying the edge adjacency header.
pub trait Edge: PoolObject {
    #[inline]
    fn source_vertex_internal_pool_index(&self) -> i32 {
        self.access().get_int(SOURCE_INDEX_OFFSET)
    }

    #[inline]
    fn set_source_vertex_internal_pool_index(&self, index: i32) {
        self.access().put_int(SOURCE_INDEX_OFFSET, index);
    }

    #[inline]
    fn target_vertex_internal_pool_index(&self) -> i32 {
        self.access().get_int(TARGET_INDEX_OFFSET)
    }

    #[inline]
    fn set_target_vertex_internal_pool_index(&self, index: i32) {
        self.access().put_int(TARGET_INDEX_OFFSET, index);
    }

    #[inline]
    fn next_source_edge_index(&self) -> i32 {
        self.access().get_int(NEXT_SOURCE_EDGE_INDEX_OFFSET)
    }

    #[inline]
    fn set_next_source_edge_index(&self, index: i32) {
        self.access().put_int(NEXT_SOURCE_EDGE_INDEX_OFFSET, index);
    }

    #[inline]
    fn next_target_edge_index(&self) -> i32 {
        self.access().get_int(NEXT_TARGET_EDGE_INDEX_OFFSET)
    }

    #[inline]
    fn set_next_target_edge_index(&self, index: i32) {
        self.access().put_int(NEXT_TARGET_EDGE_INDEX_OFFSET, index);
    }
}
