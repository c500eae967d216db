//! Minimal vertex and edge types: an integer label and nothing else.

use crate::graph::{Edge, GraphImp, ListenableGraph, Vertex, EDGE_HEADER_SIZE, VERTEX_HEADER_SIZE};
use crate::pool::byte_utils::INT_SIZE;
use crate::pool::{ByteMappedElement, MappedElement, PoolObject};

const LABEL_OFFSET: usize = VERTEX_HEADER_SIZE;
const SIMPLE_VERTEX_SIZE: usize = LABEL_OFFSET + INT_SIZE;

/// Vertex carrying a single `i32` label.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct SimpleVertex {
    access: ByteMappedElement,
}

impl SimpleVertex {
    pub fn label(&self) -> i32 {
        self.access.get_int(LABEL_OFFSET)
    }

    pub fn set_label(&self, label: i32) {
        self.access.put_int(LABEL_OFFSET, label);
    }

    /// Set the label and hand the cursor back, for use right after creation.
    pub fn init(&self, label: i32) -> &Self {
        self.set_label(label);
        self
    }
}

impl PoolObject for SimpleVertex {
    const SIZE_IN_BYTES: usize = SIMPLE_VERTEX_SIZE;

    fn from_access(access: ByteMappedElement) -> Self {
        Self { access }
    }

    fn access(&self) -> &ByteMappedElement {
        &self.access
    }

    fn access_mut(&mut self) -> &mut ByteMappedElement {
        &mut self.access
    }

    fn set_to_uninitialized_state(&self) {
        self.set_label(0);
    }
}

impl Vertex for SimpleVertex {}

impl std::fmt::Debug for SimpleVertex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.access.is_pointed() {
            write!(f, "SimpleVertex(#{} label={})", self.access.index(), self.label())
        } else {
            f.write_str("SimpleVertex(unpointed)")
        }
    }
}

/// Edge without payload.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct SimpleEdge {
    access: ByteMappedElement,
}

impl PoolObject for SimpleEdge {
    const SIZE_IN_BYTES: usize = EDGE_HEADER_SIZE;

    fn from_access(access: ByteMappedElement) -> Self {
        Self { access }
    }

    fn access(&self) -> &ByteMappedElement {
        &self.access
    }

    fn access_mut(&mut self) -> &mut ByteMappedElement {
        &mut self.access
    }
}

impl Edge for SimpleEdge {}

impl std::fmt::Debug for SimpleEdge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.access.is_pointed() {
            write!(
                f,
                "SimpleEdge(#{} {}->{})",
                self.access.index(),
                self.source_vertex_internal_pool_index(),
                self.target_vertex_internal_pool_index()
            )
        } else {
            f.write_str("SimpleEdge(unpointed)")
        }
    }
}

pub type SimpleGraph = GraphImp<SimpleVertex, SimpleEdge>;
pub type ListenableSimpleGraph = ListenableGraph<SimpleVertex, SimpleEdge>;
