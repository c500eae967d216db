//! Graph wrapper that reports structural changes to listeners.

use super::edge::Edge;
use super::edge_pool::EdgePool;
use super::graph_imp::{Graph, GraphImp, ReadOnlyGraph};
use super::vertex::Vertex;
use super::vertex_pool::VertexPool;
use crate::config::GraphConfig;
use crate::pool::from_link;
use std::sync::Arc;
use tracing::debug;

/// Receiver of graph change events. All methods default to no-ops.
///
/// Events are delivered synchronously on the mutating thread. A panicking
/// listener aborts delivery to the listeners after it.
pub trait GraphListener<V, E>: Send + Sync {
    /// The graph changed in ways not described by individual events.
    fn graph_rebuilt(&self) {}

    fn vertex_added(&self, _vertex: &V) {}

    /// Called while `vertex` is still readable, right before its slot is freed.
    fn vertex_removed(&self, _vertex: &V) {}

    fn edge_added(&self, _edge: &E) {}

    /// Called while `edge` is still readable, right before its slot is freed.
    fn edge_removed(&self, _edge: &E) {}
}

/// A [`GraphImp`] with pausable change notification.
///
/// While paused no per-entity events are sent; resuming sends a single
/// `graph_rebuilt` instead.
pub struct ListenableGraph<V: Vertex, E: Edge> {
    graph: GraphImp<V, E>,
    listeners: Vec<Arc<dyn GraphListener<V, E>>>,
    emit_events: bool,
}

impl<V: Vertex, E: Edge> ListenableGraph<V, E> {
    pub fn new(config: &GraphConfig) -> Self {
        Self::wrap(GraphImp::new(config))
    }

    pub fn wrap(graph: GraphImp<V, E>) -> Self {
        Self {
            graph,
            listeners: Vec::new(),
            emit_events: true,
        }
    }

    pub fn inner(&self) -> &GraphImp<V, E> {
        &self.graph
    }

    /// Register a listener. Returns `false` if it was already registered.
    pub fn add_graph_listener(&mut self, listener: Arc<dyn GraphListener<V, E>>) -> bool {
        if self.listeners.iter().any(|l| Arc::ptr_eq(l, &listener)) {
            return false;
        }
        self.listeners.push(listener);
        true
    }

    /// Unregister a listener. Returns `false` if it was not registered.
    pub fn remove_graph_listener(&mut self, listener: &Arc<dyn GraphListener<V, E>>) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|l| !Arc::ptr_eq(l, listener));
        self.listeners.len() != before
    }

    pub fn pause_listeners(&mut self) {
        debug!("Pausing graph listeners");
        self.emit_events = false;
    }

    /// Re-enable notification and send `graph_rebuilt` to every listener.
    pub fn resume_listeners(&mut self) {
        debug!("Resuming graph listeners");
        self.emit_events = true;
        self.notify_graph_rebuilt();
    }

    pub fn is_paused(&self) -> bool {
        !self.emit_events
    }

    pub fn notify_graph_rebuilt(&self) {
        for listener in &self.listeners {
            listener.graph_rebuilt();
        }
    }

    /// Announce every edge linked to `vertex` as removed. A self loop is
    /// announced once.
    fn notify_linked_edges_removed(&self, vertex: &V) {
        let edge_pool = self.graph.edge_pool();
        let mut edge = edge_pool.tmp_ref();
        let vertex_index = vertex.internal_pool_index();

        let mut outgoing = edge_pool.outgoing_edges(vertex);
        while outgoing.next_into(&mut edge) {
            for listener in &self.listeners {
                listener.edge_removed(&edge);
            }
        }

        let mut incoming = edge_pool.incoming_edges(vertex);
        while incoming.next_into(&mut edge) {
            if from_link(edge.source_vertex_internal_pool_index()) == Some(vertex_index) {
                continue;
            }
            for listener in &self.listeners {
                listener.edge_removed(&edge);
            }
        }

        edge_pool.release_tmp_ref(edge);
    }
}

impl<V: Vertex, E: Edge> Default for ListenableGraph<V, E> {
    fn default() -> Self {
        Self::new(&GraphConfig::default())
    }
}

impl<V: Vertex, E: Edge> ReadOnlyGraph<V, E> for ListenableGraph<V, E> {
    fn vertex_pool(&self) -> &Arc<VertexPool<V>> {
        self.graph.vertex_pool()
    }

    fn edge_pool(&self) -> &Arc<EdgePool<V, E>> {
        self.graph.edge_pool()
    }
}

impl<V: Vertex, E: Edge> Graph<V, E> for ListenableGraph<V, E> {
    fn add_vertex_into<'a>(&mut self, vertex: &'a mut V) -> &'a mut V {
        self.add_vertex_with_into(vertex, |_| {})
    }

    fn add_vertex_with_into<'a>(&mut self, vertex: &'a mut V, init: impl FnOnce(&V)) -> &'a mut V {
        self.graph.add_vertex_into(vertex);
        init(vertex);
        if self.emit_events {
            for listener in &self.listeners {
                listener.vertex_added(vertex);
            }
        }
        vertex
    }

    fn add_edge_into<'a>(&mut self, source: &V, target: &V, edge: &'a mut E) -> Option<&'a mut E> {
        self.add_edge_with_into(source, target, edge, |_| {})
    }

    fn add_edge_with_into<'a>(
        &mut self,
        source: &V,
        target: &V,
        edge: &'a mut E,
        init: impl FnOnce(&E),
    ) -> Option<&'a mut E> {
        let edge = self.graph.add_edge_into(source, target, edge)?;
        init(edge);
        if self.emit_events {
            for listener in &self.listeners {
                listener.edge_added(edge);
            }
        }
        Some(edge)
    }

    fn remove_vertex(&mut self, vertex: &V) {
        if self.emit_events {
            self.notify_linked_edges_removed(vertex);
            for listener in &self.listeners {
                listener.vertex_removed(vertex);
            }
        }
        self.graph.remove_vertex(vertex);
    }

    fn remove_edge(&mut self, edge: &E) {
        if self.emit_events {
            for listener in &self.listeners {
                listener.edge_removed(edge);
            }
        }
        self.graph.remove_edge(edge);
    }

    fn remove_all_linked_edges(&mut self, vertex: &V) {
        if self.emit_events {
            self.notify_linked_edges_removed(vertex);
        }
        self.graph.remove_all_linked_edges(vertex);
    }

    fn clear(&mut self) {
        self.graph.clear();
        if self.emit_events {
            self.notify_graph_rebuilt();
        }
    }
}

impl<V: Vertex, E: Edge> std::fmt::Debug for ListenableGraph<V, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListenableGraph")
            .field("vertices", &self.vertex_count())
            .field("edges", &self.edge_count())
            .field("listeners", &self.listeners.len())
            .field("paused", &self.is_paused())
            .finish()
    }
}
