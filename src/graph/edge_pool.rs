use super::edge::{Edge, NEXT_SOURCE_EDGE_INDEX_OFFSET, NEXT_TARGET_EDGE_INDEX_OFFSET};
use super::edges::{Direction, Edges};
use super::vertex::Vertex;
use super::vertex_pool::VertexPool;
use super::DuplicateEdgePolicy;
use crate::pool::{byte_utils, from_link, to_link, Pool, PoolIter, RefPool, StorageKind, NO_INDEX};
use std::sync::Arc;

/// Pool of edge records and owner of the intrusive adjacency lists.
///
/// The edge pool holds a shared handle on the vertex pool it links. All
/// list surgery happens here: appending on [`EdgePool::add_edge_into`],
/// splicing out on [`EdgePool::release`], and the cascade in
/// [`EdgePool::release_all_linked_edges`].
pub struct EdgePool<V: Vertex, E: Edge> {
    pool: Pool<E>,
    vertex_pool: Arc<VertexPool<V>>,
    duplicate_edges: DuplicateEdgePolicy,
}

impl<V: Vertex, E: Edge> EdgePool<V, E> {
    pub fn new(initial_capacity: usize, vertex_pool: Arc<VertexPool<V>>) -> Self {
        Self {
            pool: Pool::new(initial_capacity),
            vertex_pool,
            duplicate_edges: DuplicateEdgePolicy::default(),
        }
    }

    pub fn with_storage(
        initial_capacity: usize,
        kind: StorageKind,
        slab_bytes: usize,
        vertex_pool: Arc<VertexPool<V>>,
        duplicate_edges: DuplicateEdgePolicy,
    ) -> Self {
        Self {
            pool: Pool::with_storage(initial_capacity, kind, slab_bytes),
            vertex_pool,
            duplicate_edges,
        }
    }

    pub fn pool(&self) -> &Pool<E> {
        &self.pool
    }

    pub fn vertex_pool(&self) -> &Arc<VertexPool<V>> {
        &self.vertex_pool
    }

    pub fn duplicate_edges(&self) -> DuplicateEdgePolicy {
        self.duplicate_edges
    }

    /// Add an edge from `source` to `target`, pointing `edge` at it.
    ///
    /// The edge is appended to the tail of the source's outgoing list and
    /// of the target's incoming list, so both lists iterate in insertion
    /// order. Returns `None` without allocating when the pool rejects
    /// duplicates and a `source -> target` edge already exists; `edge` is
    /// then left pointing at that existing edge.
    pub fn add_edge_into<'a>(&self, source: &V, target: &V, edge: &'a mut E) -> Option<&'a mut E> {
        if self.duplicate_edges == DuplicateEdgePolicy::Reject
            && self.get_edge_into(source, target, edge).is_some()
        {
            return None;
        }

        self.pool.create_into(edge);
        let edge_link = to_link(edge.internal_pool_index());
        edge.set_source_vertex_internal_pool_index(to_link(source.internal_pool_index()));
        edge.set_target_vertex_internal_pool_index(to_link(target.internal_pool_index()));
        edge.set_next_source_edge_index(NO_INDEX);
        edge.set_next_target_edge_index(NO_INDEX);

        let mut tail = self.pool.tmp_ref();

        match from_link(source.first_out_edge_index()) {
            None => source.set_first_out_edge_index(edge_link),
            Some(head) => {
                self.pool.get_into(head, &mut tail);
                while let Some(next) = from_link(tail.next_source_edge_index()) {
                    self.pool.get_into(next, &mut tail);
                }
                tail.set_next_source_edge_index(edge_link);
            }
        }

        match from_link(target.first_in_edge_index()) {
            None => target.set_first_in_edge_index(edge_link),
            Some(head) => {
                self.pool.get_into(head, &mut tail);
                while let Some(next) = from_link(tail.next_target_edge_index()) {
                    self.pool.get_into(next, &mut tail);
                }
                tail.set_next_target_edge_index(edge_link);
            }
        }

        self.pool.release_tmp_ref(tail);
        Some(edge)
    }

    pub fn add_edge(&self, source: &V, target: &V) -> Option<E> {
        let mut edge = self.pool.create_ref();
        if self.add_edge_into(source, target, &mut edge).is_some() {
            Some(edge)
        } else {
            self.pool.release_ref(edge);
            None
        }
    }

    /// First edge from `source` to `target` in the source's outgoing list.
    pub fn get_edge_into<'a>(&self, source: &V, target: &V, edge: &'a mut E) -> Option<&'a mut E> {
        let target_link = to_link(target.internal_pool_index());
        let mut link = source.first_out_edge_index();
        while let Some(index) = from_link(link) {
            self.pool.get_into(index, edge);
            if edge.target_vertex_internal_pool_index() == target_link {
                return Some(edge);
            }
            link = edge.next_source_edge_index();
        }
        None
    }

    pub fn get_edge(&self, source: &V, target: &V) -> Option<E> {
        let mut edge = self.pool.create_ref();
        if self.get_edge_into(source, target, &mut edge).is_some() {
            Some(edge)
        } else {
            self.pool.release_ref(edge);
            None
        }
    }

    /// Unlink `edge` from both of its lists and free its slot.
    pub fn release(&self, edge: &E) {
        let mut vertex = self.vertex_pool.tmp_ref();
        let mut scratch = self.pool.tmp_ref();
        self.unlink_from_source(edge, &mut vertex, &mut scratch);
        self.unlink_from_target(edge, &mut vertex, &mut scratch);
        self.pool.delete(edge);
        self.pool.release_tmp_ref(scratch);
        self.vertex_pool.release_tmp_ref(vertex);
    }

    /// Release every edge in both adjacency lists of `vertex` and leave
    /// both heads at `-1`. Must run before the vertex slot is freed.
    pub fn release_all_linked_edges(&self, vertex: &V) {
        let mut edge = self.pool.tmp_ref();
        let mut other = self.vertex_pool.tmp_ref();
        let mut scratch = self.pool.tmp_ref();

        let mut link = vertex.first_out_edge_index();
        vertex.set_first_out_edge_index(NO_INDEX);
        while let Some(index) = from_link(link) {
            self.pool.get_into(index, &mut edge);
            link = edge.next_source_edge_index();
            self.unlink_from_target(&edge, &mut other, &mut scratch);
            self.pool.delete(&edge);
        }

        // Self loops are gone already: they were unlinked from this
        // vertex's incoming list above.
        let mut link = vertex.first_in_edge_index();
        vertex.set_first_in_edge_index(NO_INDEX);
        while let Some(index) = from_link(link) {
            self.pool.get_into(index, &mut edge);
            link = edge.next_target_edge_index();
            self.unlink_from_source(&edge, &mut other, &mut scratch);
            self.pool.delete(&edge);
        }

        self.pool.release_tmp_ref(scratch);
        self.vertex_pool.release_tmp_ref(other);
        self.pool.release_tmp_ref(edge);
    }

    fn unlink_from_source(&self, edge: &E, vertex: &mut V, scratch: &mut E) {
        let edge_link = to_link(edge.internal_pool_index());
        let Some(source) = from_link(edge.source_vertex_internal_pool_index()) else {
            return;
        };
        self.vertex_pool.get_into(source, vertex);

        let head = vertex.first_out_edge_index();
        if head == edge_link {
            vertex.set_first_out_edge_index(edge.next_source_edge_index());
            return;
        }

        let mut link = head;
        while let Some(index) = from_link(link) {
            self.pool.get_into(index, scratch);
            link = scratch.next_source_edge_index();
            if link == edge_link {
                scratch.set_next_source_edge_index(edge.next_source_edge_index());
                return;
            }
        }
        if cfg!(debug_assertions) {
            panic!("edge {} missing from outgoing list of vertex {}", edge_link, source);
        }
    }

    fn unlink_from_target(&self, edge: &E, vertex: &mut V, scratch: &mut E) {
        let edge_link = to_link(edge.internal_pool_index());
        let Some(target) = from_link(edge.target_vertex_internal_pool_index()) else {
            return;
        };
        self.vertex_pool.get_into(target, vertex);

        let head = vertex.first_in_edge_index();
        if head == edge_link {
            vertex.set_first_in_edge_index(edge.next_target_edge_index());
            return;
        }

        let mut link = head;
        while let Some(index) = from_link(link) {
            self.pool.get_into(index, scratch);
            link = scratch.next_target_edge_index();
            if link == edge_link {
                scratch.set_next_target_edge_index(edge.next_target_edge_index());
                return;
            }
        }
        if cfg!(debug_assertions) {
            panic!("edge {} missing from incoming list of vertex {}", edge_link, target);
        }
    }

    pub fn source_into<'a>(&self, edge: &E, vertex: &'a mut V) -> &'a mut V {
        self.vertex_pool
            .get_into(edge.source_vertex_internal_pool_index() as usize, vertex)
    }

    pub fn source(&self, edge: &E) -> V {
        let mut vertex = self.vertex_pool.create_ref();
        self.source_into(edge, &mut vertex);
        vertex
    }

    pub fn target_into<'a>(&self, edge: &E, vertex: &'a mut V) -> &'a mut V {
        self.vertex_pool
            .get_into(edge.target_vertex_internal_pool_index() as usize, vertex)
    }

    pub fn target(&self, edge: &E) -> V {
        let mut vertex = self.vertex_pool.create_ref();
        self.target_into(edge, &mut vertex);
        vertex
    }

    pub fn outgoing_edges(&self, vertex: &V) -> Edges<'_, V, E> {
        Edges::new(self, vertex.internal_pool_index(), Direction::Outgoing)
    }

    pub fn incoming_edges(&self, vertex: &V) -> Edges<'_, V, E> {
        Edges::new(self, vertex.internal_pool_index(), Direction::Incoming)
    }

    /// Outgoing edges followed by incoming edges. A self loop shows up in both.
    pub fn edges(&self, vertex: &V) -> Edges<'_, V, E> {
        Edges::new(self, vertex.internal_pool_index(), Direction::Both)
    }

    /// Successor of the edge at `index` in the outgoing (`true`) or
    /// incoming (`false`) list, read without a cursor.
    pub(crate) fn next_edge_index_of(&self, index: usize, outgoing: bool) -> i32 {
        let offset = if outgoing {
            NEXT_SOURCE_EDGE_INDEX_OFFSET
        } else {
            NEXT_TARGET_EDGE_INDEX_OFFSET
        };
        let mem = self.pool.mem_pool().read();
        byte_utils::get_int(mem.slot(index), offset)
    }

    #[inline]
    pub fn get_into<'a>(&self, index: usize, edge: &'a mut E) -> &'a mut E {
        self.pool.get_into(index, edge)
    }

    pub fn get(&self, index: usize) -> E {
        self.pool.get(index)
    }

    pub fn create_ref(&self) -> E {
        self.pool.create_ref()
    }

    pub fn release_ref(&self, edge: E) {
        self.pool.release_ref(edge)
    }

    pub fn tmp_ref(&self) -> E {
        self.pool.tmp_ref()
    }

    pub fn release_tmp_ref(&self, edge: E) {
        self.pool.release_tmp_ref(edge)
    }

    pub fn size(&self) -> usize {
        self.pool.size()
    }

    pub fn iter(&self) -> PoolIter<'_, E> {
        self.pool.iter()
    }

    pub(crate) fn clear(&self) {
        self.pool.clear();
    }
}

impl<V: Vertex, E: Edge> RefPool<E> for EdgePool<V, E> {
    fn create_ref(&self) -> E {
        self.pool.create_ref()
    }

    fn release_ref(&self, edge: E) {
        self.pool.release_ref(edge)
    }

    fn get_object_into<'a>(&self, id: i32, edge: &'a mut E) -> &'a mut E {
        RefPool::get_object_into(&self.pool, id, edge)
    }

    fn get_id(&self, edge: &E) -> i32 {
        RefPool::get_id(&self.pool, edge)
    }
}
