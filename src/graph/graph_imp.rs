use super::edge::Edge;
use super::edge_pool::EdgePool;
use super::edges::Edges;
use super::vertex::Vertex;
use super::vertex_pool::VertexPool;
use crate::collection::{IntRefMap, RefDeque, RefIntMap, RefList, RefRefMap, RefSet, RefStack};
use crate::config::GraphConfig;
use crate::pool::PoolIter;
use std::sync::Arc;
use tracing::debug;

/// Read access to a pool-backed graph.
///
/// Everything except the two pool accessors has a default body, so a graph
/// type only has to say where its pools are.
pub trait ReadOnlyGraph<V: Vertex, E: Edge> {
    fn vertex_pool(&self) -> &Arc<VertexPool<V>>;

    fn edge_pool(&self) -> &Arc<EdgePool<V, E>>;

    fn vertex_ref(&self) -> V {
        self.vertex_pool().create_ref()
    }

    fn edge_ref(&self) -> E {
        self.edge_pool().create_ref()
    }

    fn release_vertex_ref(&self, vertex: V) {
        self.vertex_pool().release_ref(vertex)
    }

    fn release_edge_ref(&self, edge: E) {
        self.edge_pool().release_ref(edge)
    }

    fn vertex_count(&self) -> usize {
        self.vertex_pool().size()
    }

    fn edge_count(&self) -> usize {
        self.edge_pool().size()
    }

    fn vertices(&self) -> PoolIter<'_, V> {
        self.vertex_pool().iter()
    }

    fn edges(&self) -> PoolIter<'_, E> {
        self.edge_pool().iter()
    }

    fn get_edge_into<'a>(&self, source: &V, target: &V, edge: &'a mut E) -> Option<&'a mut E> {
        self.edge_pool().get_edge_into(source, target, edge)
    }

    fn get_edge(&self, source: &V, target: &V) -> Option<E> {
        self.edge_pool().get_edge(source, target)
    }

    fn outgoing_edges(&self, vertex: &V) -> Edges<'_, V, E> {
        self.edge_pool().outgoing_edges(vertex)
    }

    fn incoming_edges(&self, vertex: &V) -> Edges<'_, V, E> {
        self.edge_pool().incoming_edges(vertex)
    }

    fn edges_of(&self, vertex: &V) -> Edges<'_, V, E> {
        self.edge_pool().edges(vertex)
    }

    fn edge_source_into<'a>(&self, edge: &E, vertex: &'a mut V) -> &'a mut V {
        self.edge_pool().source_into(edge, vertex)
    }

    fn edge_source(&self, edge: &E) -> V {
        self.edge_pool().source(edge)
    }

    fn edge_target_into<'a>(&self, edge: &E, vertex: &'a mut V) -> &'a mut V {
        self.edge_pool().target_into(edge, vertex)
    }

    fn edge_target(&self, edge: &E) -> V {
        self.edge_pool().target(edge)
    }

    fn create_vertex_list(&self) -> RefList<V> {
        RefList::new(self.vertex_pool().clone())
    }

    fn create_vertex_set(&self) -> RefSet<V> {
        RefSet::new(self.vertex_pool().clone())
    }

    fn create_vertex_deque(&self) -> RefDeque<V> {
        RefDeque::new(self.vertex_pool().clone())
    }

    fn create_vertex_stack(&self) -> RefStack<V> {
        RefStack::new(self.vertex_pool().clone())
    }

    fn create_vertex_vertex_map(&self) -> RefRefMap<V, V> {
        RefRefMap::new(self.vertex_pool().clone(), self.vertex_pool().clone())
    }

    fn create_vertex_int_map(&self, no_entry_value: i32) -> RefIntMap<V> {
        RefIntMap::new(self.vertex_pool().clone(), no_entry_value)
    }

    fn create_int_vertex_map(&self) -> IntRefMap<V> {
        IntRefMap::new(self.vertex_pool().clone())
    }

    fn create_edge_list(&self) -> RefList<E> {
        RefList::new(self.edge_pool().clone())
    }

    fn create_edge_set(&self) -> RefSet<E> {
        RefSet::new(self.edge_pool().clone())
    }
}

/// Structural mutation of a pool-backed graph.
pub trait Graph<V: Vertex, E: Edge>: ReadOnlyGraph<V, E> {
    fn add_vertex_into<'a>(&mut self, vertex: &'a mut V) -> &'a mut V;

    /// Add an edge; `None` when the graph rejects a duplicate.
    fn add_edge_into<'a>(&mut self, source: &V, target: &V, edge: &'a mut E) -> Option<&'a mut E>;

    /// Remove `vertex` together with every edge linked to it.
    fn remove_vertex(&mut self, vertex: &V);

    fn remove_edge(&mut self, edge: &E);

    fn remove_all_linked_edges(&mut self, vertex: &V);

    fn clear(&mut self);

    /// Add a vertex and run `init` on it before anyone is told about it.
    fn add_vertex_with_into<'a>(&mut self, vertex: &'a mut V, init: impl FnOnce(&V)) -> &'a mut V {
        self.add_vertex_into(vertex);
        init(vertex);
        vertex
    }

    /// Add an edge and run `init` on it before anyone is told about it.
    fn add_edge_with_into<'a>(
        &mut self,
        source: &V,
        target: &V,
        edge: &'a mut E,
        init: impl FnOnce(&E),
    ) -> Option<&'a mut E> {
        let edge = self.add_edge_into(source, target, edge)?;
        init(edge);
        Some(edge)
    }

    fn add_vertex(&mut self) -> V {
        let mut vertex = self.vertex_ref();
        self.add_vertex_into(&mut vertex);
        vertex
    }

    fn add_edge(&mut self, source: &V, target: &V) -> Option<E> {
        let mut edge = self.edge_ref();
        if self.add_edge_into(source, target, &mut edge).is_some() {
            Some(edge)
        } else {
            self.release_edge_ref(edge);
            None
        }
    }
}

/// Graph composed of a vertex pool and the edge pool linking it.
pub struct GraphImp<V: Vertex, E: Edge> {
    vertex_pool: Arc<VertexPool<V>>,
    edge_pool: Arc<EdgePool<V, E>>,
}

impl<V: Vertex, E: Edge> GraphImp<V, E> {
    pub fn new(config: &GraphConfig) -> Self {
        let vertex_pool = Arc::new(VertexPool::with_storage(
            config.initial_vertex_capacity,
            config.storage,
            config.slab_bytes,
        ));
        let edge_pool = EdgePool::with_storage(
            config.initial_edge_capacity,
            config.storage,
            config.slab_bytes,
            vertex_pool,
            config.duplicate_edges,
        );
        debug!(
            "Created graph: {} vertex slots, {} edge slots, {:?} storage",
            config.initial_vertex_capacity, config.initial_edge_capacity, config.storage
        );
        Self::from_edge_pool(edge_pool)
    }

    /// Wrap an existing edge pool and the vertex pool it links.
    pub fn from_edge_pool(edge_pool: EdgePool<V, E>) -> Self {
        Self {
            vertex_pool: edge_pool.vertex_pool().clone(),
            edge_pool: Arc::new(edge_pool),
        }
    }
}

impl<V: Vertex, E: Edge> Default for GraphImp<V, E> {
    fn default() -> Self {
        Self::new(&GraphConfig::default())
    }
}

impl<V: Vertex, E: Edge> ReadOnlyGraph<V, E> for GraphImp<V, E> {
    fn vertex_pool(&self) -> &Arc<VertexPool<V>> {
        &self.vertex_pool
    }

    fn edge_pool(&self) -> &Arc<EdgePool<V, E>> {
        &self.edge_pool
    }
}

impl<V: Vertex, E: Edge> Graph<V, E> for GraphImp<V, E> {
    fn add_vertex_into<'a>(&mut self, vertex: &'a mut V) -> &'a mut V {
        self.vertex_pool.create_into(vertex)
    }

    fn add_edge_into<'a>(&mut self, source: &V, target: &V, edge: &'a mut E) -> Option<&'a mut E> {
        self.edge_pool.add_edge_into(source, target, edge)
    }

    fn remove_vertex(&mut self, vertex: &V) {
        self.edge_pool.release_all_linked_edges(vertex);
        self.vertex_pool.delete(vertex);
    }

    fn remove_edge(&mut self, edge: &E) {
        self.edge_pool.release(edge);
    }

    fn remove_all_linked_edges(&mut self, vertex: &V) {
        self.edge_pool.release_all_linked_edges(vertex);
    }

    fn clear(&mut self) {
        self.edge_pool.clear();
        self.vertex_pool.clear();
    }
}

impl<V: Vertex, E: Edge> std::fmt::Debug for GraphImp<V, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GraphImp")
            .field("vertices", &self.vertex_count())
            .field("edges", &self.edge_count())
            .finish()
    }
}
