//! Vertex record header.
//!
//! Every vertex record starts with the heads of its two adjacency lists.
//! Concrete vertex types lay out their payload from [`VERTEX_HEADER_SIZE`].

use crate::pool::byte_utils::INT_SIZE;
use crate::pool::{MappedElement, PoolObject, NO_INDEX};

pub const FIRST_IN_EDGE_INDEX_OFFSET: usize = 0;
pub const FIRST_OUT_EDGE_INDEX_OFFSET: usize = FIRST_IN_EDGE_INDEX_OFFSET + INT_SIZE;
pub const VERTEX_HEADER_SIZE: usize = FIRST_OUT_EDGE_INDEX_OFFSET + INT_SIZE;

/// A pool object carrying the vertex adjacency header.
pub trait Vertex: PoolObject {
    #[inline]
    fn first_in_edge_index(&self) -> i32 {
        self.access().get_int(FIRST_IN_EDGE_INDEX_OFFSET)
    }

    #[inline]
    fn set_first_in_edge_index(&self, index: i32) {
        self.access().put_int(FIRST_IN_EDGE_INDEX_OFFSET, index);
    }

    #[inline]
    fn first_out_edge_index(&self) -> i32 {
        self.access().get_int(FIRST_OUT_EDGE_INDEX_OFFSET)
    }

    #[inline]
    fn set_first_out_edge_index(&self, index: i32) {
        self.access().put_int(FIRST_OUT_EDGE_INDEX_OFFSET, index);
    }

    /// Mark both adjacency lists empty.
    fn reset_adjacency(&self) {
        self.set_first_in_edge_index(NO_INDEX);
        self.set_first_out_edge_index(NO_INDEX);
    }
}
