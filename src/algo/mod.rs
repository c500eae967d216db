//! Graph algorithms module
//!
//! Traversals run directly on the pool graph. Whole-graph analytics live in
//! the `poolgraph-algorithms` crate and work on a CSR snapshot built by
//! [`build_view`].

pub mod traversal;

use crate::graph::{Edge, ReadOnlyGraph, Vertex};
use poolgraph_algorithms::NodeId;

pub use poolgraph_algorithms::{
    bfs, reachable_from, weakly_connected_components, GraphView, PathResult, WccResult,
};
pub use traversal::{
    breadth_first_order, depth_first_order, BreadthFirstSearch, DepthFirstSearch, DiscoveryOrder,
    EdgeClass, SearchDirection, SearchListener,
};

/// Snapshot the topology of `graph`. Node ids are vertex pool indices.
pub fn build_view<V, E, G>(graph: &G) -> GraphView
where
    V: Vertex,
    E: Edge,
    G: ReadOnlyGraph<V, E>,
{
    let nodes: Vec<NodeId> = graph
        .vertex_pool()
        .pool()
        .indices()
        .map(|index| index as NodeId)
        .collect();

    let mut edges = Vec::with_capacity(graph.edge_count());
    let mut vertex = graph.vertex_ref();
    let mut edge = graph.edge_ref();
    let mut vertices = graph.vertices();
    while vertices.next_into(&mut vertex) {
        let source = vertex.internal_pool_index() as NodeId;
        let mut outgoing = graph.outgoing_edges(&vertex);
        while outgoing.next_into(&mut edge) {
            edges.push((source, edge.target_vertex_internal_pool_index() as NodeId));
        }
    }
    graph.release_edge_ref(edge);
    graph.release_vertex_ref(vertex);

    GraphView::from_edges(&nodes, &edges)
}
