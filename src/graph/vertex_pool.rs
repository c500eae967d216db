use super::vertex::{Vertex, FIRST_IN_EDGE_INDEX_OFFSET, FIRST_OUT_EDGE_INDEX_OFFSET};
use crate::pool::{byte_utils, Pool, PoolIter, RefPool, StorageKind};

/// Pool of vertex records.
///
/// Freshly created vertices have empty adjacency lists. Deleting a vertex
/// is crate-internal: it must go through the graph so incident edges are
/// released first.
pub struct VertexPool<V: Vertex> {
    pool: Pool<V>,
}

impl<V: Vertex> VertexPool<V> {
    pub fn new(initial_capacity: usize) -> Self {
        Self {
            pool: Pool::new(initial_capacity),
        }
    }

    pub fn with_storage(initial_capacity: usize, kind: StorageKind, slab_bytes: usize) -> Self {
        Self {
            pool: Pool::with_storage(initial_capacity, kind, slab_bytes),
        }
    }

    pub fn pool(&self) -> &Pool<V> {
        &self.pool
    }

    pub fn create_into<'a>(&self, vertex: &'a mut V) -> &'a mut V {
        self.pool.create_into(vertex);
        vertex.reset_adjacency();
        vertex
    }

    pub fn create(&self) -> V {
        let mut vertex = self.pool.create_ref();
        self.create_into(&mut vertex);
        vertex
    }

    #[inline]
    pub fn get_into<'a>(&self, index: usize, vertex: &'a mut V) -> &'a mut V {
        self.pool.get_into(index, vertex)
    }

    pub fn get(&self, index: usize) -> V {
        self.pool.get(index)
    }

    pub fn create_ref(&self) -> V {
        self.pool.create_ref()
    }

    pub fn release_ref(&self, vertex: V) {
        self.pool.release_ref(vertex)
    }

    pub fn tmp_ref(&self) -> V {
        self.pool.tmp_ref()
    }

    pub fn release_tmp_ref(&self, vertex: V) {
        self.pool.release_tmp_ref(vertex)
    }

    pub fn size(&self) -> usize {
        self.pool.size()
    }

    pub fn iter(&self) -> PoolIter<'_, V> {
        self.pool.iter()
    }

    /// Head of the incoming list of the vertex at `index`, read without a cursor.
    pub(crate) fn first_in_edge_index_of(&self, index: usize) -> i32 {
        let mem = self.pool.mem_pool().read();
        byte_utils::get_int(mem.slot(index), FIRST_IN_EDGE_INDEX_OFFSET)
    }

    /// Head of the outgoing list of the vertex at `index`, read without a cursor.
    pub(crate) fn first_out_edge_index_of(&self, index: usize) -> i32 {
        let mem = self.pool.mem_pool().read();
        byte_utils::get_int(mem.slot(index), FIRST_OUT_EDGE_INDEX_OFFSET)
    }

    pub(crate) fn delete(&self, vertex: &V) {
        debug_assert!(
            vertex.first_in_edge_index() < 0 && vertex.first_out_edge_index() < 0,
            "vertex {} deleted with linked edges",
            vertex.internal_pool_index()
        );
        self.pool.delete(vertex);
    }

    pub(crate) fn clear(&self) {
        self.pool.clear();
    }
}

impl<V: Vertex> RefPool<V> for VertexPool<V> {
    fn create_ref(&self) -> V {
        self.pool.create_ref()
    }

    fn release_ref(&self, vertex: V) {
        self.pool.release_ref(vertex)
    }

    fn get_object_into<'a>(&self, id: i32, vertex: &'a mut V) -> &'a mut V {
        RefPool::get_object_into(&self.pool, id, vertex)
    }

    fn get_id(&self, vertex: &V) -> i32 {
        RefPool::get_id(&self.pool, vertex)
    }
}
