use super::PropertyMap;
use crate::graph::GraphListener;
use std::sync::Arc;

/// Graph listener dropping the property of every removed vertex.
pub struct VertexPropertyCleanup<V> {
    map: Arc<dyn PropertyMap<V>>,
}

impl<V> VertexPropertyCleanup<V> {
    pub fn new(map: Arc<dyn PropertyMap<V>>) -> Self {
        Self { map }
    }
}

impl<V, E> GraphListener<V, E> for VertexPropertyCleanup<V> {
    fn vertex_removed(&self, vertex: &V) {
        self.map.remove_property(vertex);
    }
}

/// Graph listener dropping the property of every removed edge.
pub struct EdgePropertyCleanup<E> {
    map: Arc<dyn PropertyMap<E>>,
}

impl<E> EdgePropertyCleanup<E> {
    pub fn new(map: Arc<dyn PropertyMap<E>>) -> Self {
        Self { map }
    }
}

impl<V, E> GraphListener<V, E> for EdgePropertyCleanup<E> {
    fn edge_removed(&self, edge: &E) {
        self.map.remove_property(edge);
    }
}
