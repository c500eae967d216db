use super::edge::Edge;
use super::graph_imp::ReadOnlyGraph;
use super::vertex::Vertex;
use crate::pool::RefPool;
use std::sync::Arc;

/// Bidirectional vertex/edge <-> id translation for one graph.
///
/// Ids are pool indices, so they are only meaningful while the entity is
/// alive and are reused after removal.
pub struct GraphIdBimap<V, E> {
    vertices: Arc<dyn RefPool<V>>,
    edges: Arc<dyn RefPool<E>>,
}

impl<V: Vertex, E: Edge> GraphIdBimap<V, E> {
    pub fn new<G: ReadOnlyGraph<V, E>>(graph: &G) -> Self {
        Self {
            vertices: graph.vertex_pool().clone(),
            edges: graph.edge_pool().clone(),
        }
    }

    pub fn vertex_id(&self, vertex: &V) -> i32 {
        self.vertices.get_id(vertex)
    }

    pub fn vertex_into<'a>(&self, id: i32, vertex: &'a mut V) -> &'a mut V {
        self.vertices.get_object_into(id, vertex)
    }

    pub fn edge_id(&self, edge: &E) -> i32 {
        self.edges.get_id(edge)
    }

    pub fn edge_into<'a>(&self, id: i32, edge: &'a mut E) -> &'a mut E {
        self.edges.get_object_into(id, edge)
    }

    pub fn vertex_id_bimap(&self) -> &Arc<dyn RefPool<V>> {
        &self.vertices
    }

    pub fn edge_id_bimap(&self) -> &Arc<dyn RefPool<E>> {
        &self.edges
    }
}

impl<V, E> Clone for GraphIdBimap<V, E> {
    fn clone(&self) -> Self {
        Self {
            vertices: self.vertices.clone(),
            edges: self.edges.clone(),
        }
    }
}
