//! Breadth- and depth-first search over pool graphs.
//!
//! Both searches walk the intrusive adjacency lists with a handful of
//! reused cursors and keep their bookkeeping in id-based collections, so a
//! search allocates nothing per visited vertex beyond collection growth.

use crate::collection::{RefDeque, RefIntMap, RefList, RefSet};
use crate::graph::{Edge, Edges, ReadOnlyGraph, Vertex};
use crate::pool::{to_link, NO_INDEX};

/// Which edges a search follows out of a vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchDirection {
    /// Outgoing edges, source to target.
    #[default]
    Directed,
    /// Incoming edges, target to source.
    Reversed,
    /// Both lists, ignoring edge direction.
    Undirected,
}

/// Classification of an edge at the moment the search crosses it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeClass {
    /// The edge discovered its far vertex.
    Tree,
    /// The far vertex is an ancestor still being processed, or the edge is
    /// a self loop.
    Back,
    /// The far vertex is an already finished descendant (depth-first only).
    Forward,
    /// Any other edge.
    Cross,
}

/// Callbacks of a search. All methods default to no-ops.
pub trait SearchListener<V, E> {
    fn process_vertex_early(&mut self, _vertex: &V) {}

    fn process_edge(&mut self, _edge: &E, _from: &V, _to: &V, _class: EdgeClass) {}

    fn process_vertex_late(&mut self, _vertex: &V) {}
}

/// Listener collecting vertices in discovery order.
pub struct DiscoveryOrder<V> {
    vertices: RefList<V>,
}

impl<V> DiscoveryOrder<V> {
    pub fn new(vertices: RefList<V>) -> Self {
        Self { vertices }
    }

    pub fn into_list(self) -> RefList<V> {
        self.vertices
    }
}

impl<V, E> SearchListener<V, E> for DiscoveryOrder<V> {
    fn process_vertex_early(&mut self, vertex: &V) {
        self.vertices.add(vertex);
    }
}

fn edges_for<'g, V: Vertex, E: Edge, G: ReadOnlyGraph<V, E>>(
    graph: &'g G,
    direction: SearchDirection,
    vertex: &V,
) -> Edges<'g, V, E> {
    match direction {
        SearchDirection::Directed => graph.outgoing_edges(vertex),
        SearchDirection::Reversed => graph.incoming_edges(vertex),
        SearchDirection::Undirected => graph.edges_of(vertex),
    }
}

/// Point `other` at the endpoint of `edge` that the search moves to from
/// `vertex`.
fn far_end_into<V: Vertex, E: Edge, G: ReadOnlyGraph<V, E>>(
    graph: &G,
    direction: SearchDirection,
    vertex: &V,
    edge: &E,
    other: &mut V,
) {
    let to_target = match direction {
        SearchDirection::Directed => true,
        SearchDirection::Reversed => false,
        SearchDirection::Undirected => {
            edge.source_vertex_internal_pool_index() == to_link(vertex.internal_pool_index())
        }
    };
    if to_target {
        graph.edge_target_into(edge, other);
    } else {
        graph.edge_source_into(edge, other);
    }
}

fn edge_id<E: Edge>(edge: &E) -> i32 {
    to_link(edge.internal_pool_index())
}

/// Breadth-first search. Children are visited in adjacency list order.
pub struct BreadthFirstSearch<'g, V: Vertex, E: Edge, G: ReadOnlyGraph<V, E>> {
    graph: &'g G,
    direction: SearchDirection,
    discovered: RefSet<V>,
    processed: RefSet<V>,
    queue: RefDeque<V>,
    parent_edge: RefIntMap<V>,
    _edge: std::marker::PhantomData<fn(&E)>,
}

impl<'g, V: Vertex, E: Edge, G: ReadOnlyGraph<V, E>> BreadthFirstSearch<'g, V, E, G> {
    pub fn new(graph: &'g G, direction: SearchDirection) -> Self {
        Self {
            graph,
            direction,
            discovered: graph.create_vertex_set(),
            processed: graph.create_vertex_set(),
            queue: graph.create_vertex_deque(),
            parent_edge: graph.create_vertex_int_map(NO_INDEX),
            _edge: std::marker::PhantomData,
        }
    }

    pub fn was_discovered(&self, vertex: &V) -> bool {
        self.discovered.contains(vertex)
    }

    pub fn start(&mut self, start: &V, listener: &mut dyn SearchListener<V, E>) {
        self.discovered.clear();
        self.processed.clear();
        self.queue.clear();
        self.parent_edge.clear();

        let graph = self.graph;
        let undirected = self.direction == SearchDirection::Undirected;
        let mut vertex = graph.vertex_ref();
        let mut other = graph.vertex_ref();
        let mut edge = graph.edge_ref();

        self.discovered.insert(start);
        self.queue.push_back(start);
        while self.queue.pop_front_into(&mut vertex).is_some() {
            listener.process_vertex_early(&vertex);
            let mut skip = if undirected {
                self.parent_edge.get(&vertex)
            } else {
                NO_INDEX
            };

            let mut edges = edges_for(graph, self.direction, &vertex);
            while edges.next_into(&mut edge) {
                if edge_id(&edge) == skip {
                    skip = NO_INDEX;
                    continue;
                }
                far_end_into(graph, self.direction, &vertex, &edge, &mut other);
                let class = if !self.discovered.contains(&other) {
                    self.discovered.insert(&other);
                    self.parent_edge.put(&other, edge_id(&edge));
                    self.queue.push_back(&other);
                    EdgeClass::Tree
                } else if other.internal_pool_index() == vertex.internal_pool_index()
                    || self.processed.contains(&other)
                {
                    EdgeClass::Back
                } else {
                    EdgeClass::Cross
                };
                listener.process_edge(&edge, &vertex, &other, class);
            }

            listener.process_vertex_late(&vertex);
            self.processed.insert(&vertex);
        }

        graph.release_edge_ref(edge);
        graph.release_vertex_ref(other);
        graph.release_vertex_ref(vertex);
    }
}

struct Frame<'g, V: Vertex, E: Edge> {
    vertex: usize,
    edges: Edges<'g, V, E>,
    parent_edge: i32,
}

/// Depth-first search. Children are visited in adjacency list order.
pub struct DepthFirstSearch<'g, V: Vertex, E: Edge, G: ReadOnlyGraph<V, E>> {
    graph: &'g G,
    direction: SearchDirection,
    discovery_time: RefIntMap<V>,
    processed: RefSet<V>,
    frames: Vec<Frame<'g, V, E>>,
}

impl<'g, V: Vertex, E: Edge, G: ReadOnlyGraph<V, E>> DepthFirstSearch<'g, V, E, G> {
    pub fn new(graph: &'g G, direction: SearchDirection) -> Self {
        Self {
            graph,
            direction,
            discovery_time: graph.create_vertex_int_map(NO_INDEX),
            processed: graph.create_vertex_set(),
            frames: Vec::new(),
        }
    }

    pub fn was_discovered(&self, vertex: &V) -> bool {
        self.discovery_time.contains_key(vertex)
    }

    pub fn start(&mut self, start: &V, listener: &mut dyn SearchListener<V, E>) {
        self.discovery_time.clear();
        self.processed.clear();
        self.frames.clear();

        let graph = self.graph;
        let undirected = self.direction == SearchDirection::Undirected;
        let mut vertex = graph.vertex_ref();
        let mut other = graph.vertex_ref();
        let mut edge = graph.edge_ref();
        let mut time = 0;

        self.discovery_time.put(start, time);
        listener.process_vertex_early(start);
        self.frames.push(Frame {
            vertex: start.internal_pool_index(),
            edges: edges_for(graph, self.direction, start),
            parent_edge: NO_INDEX,
        });

        while let Some(frame) = self.frames.last_mut() {
            let vertex_index = frame.vertex;
            if !frame.edges.next_into(&mut edge) {
                self.frames.pop();
                graph.vertex_pool().get_into(vertex_index, &mut vertex);
                listener.process_vertex_late(&vertex);
                self.processed.insert(&vertex);
                continue;
            }
            if undirected && edge_id(&edge) == frame.parent_edge {
                frame.parent_edge = NO_INDEX;
                continue;
            }

            graph.vertex_pool().get_into(vertex_index, &mut vertex);
            far_end_into(graph, self.direction, &vertex, &edge, &mut other);
            let other_time = self.discovery_time.get(&other);
            if other_time == NO_INDEX {
                listener.process_edge(&edge, &vertex, &other, EdgeClass::Tree);
                time += 1;
                self.discovery_time.put(&other, time);
                listener.process_vertex_early(&other);
                self.frames.push(Frame {
                    vertex: other.internal_pool_index(),
                    edges: edges_for(graph, self.direction, &other),
                    parent_edge: edge_id(&edge),
                });
                continue;
            }

            let class = if !self.processed.contains(&other) {
                EdgeClass::Back
            } else if other_time > self.discovery_time.get(&vertex) {
                EdgeClass::Forward
            } else {
                EdgeClass::Cross
            };
            listener.process_edge(&edge, &vertex, &other, class);
        }

        graph.release_edge_ref(edge);
        graph.release_vertex_ref(other);
        graph.release_vertex_ref(vertex);
    }
}

/// Vertices reachable from `start`, in breadth-first discovery order.
pub fn breadth_first_order<V, E, G>(graph: &G, start: &V, direction: SearchDirection) -> RefList<V>
where
    V: Vertex,
    E: Edge,
    G: ReadOnlyGraph<V, E>,
{
    let mut order = DiscoveryOrder::new(graph.create_vertex_list());
    BreadthFirstSearch::new(graph, direction).start(start, &mut order);
    order.into_list()
}

/// Vertices reachable from `start`, in depth-first discovery order.
pub fn depth_first_order<V, E, G>(graph: &G, start: &V, direction: SearchDirection) -> RefList<V>
where
    V: Vertex,
    E: Edge,
    G: ReadOnlyGraph<V, E>,
{
    let mut order = DiscoveryOrder::new(graph.create_vertex_list());
    DepthFirstSearch::new(graph, direction).start(start, &mut order);
    order.into_list()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Graph;
    use crate::model::{SimpleEdge, SimpleGraph, SimpleVertex};

    /// Records `(from label, to label, class)` of every crossed edge.
    #[derive(Default)]
    struct EdgeRecorder {
        edges: Vec<(i32, i32, EdgeClass)>,
        finished: Vec<i32>,
    }

    impl SearchListener<SimpleVertex, SimpleEdge> for EdgeRecorder {
        fn process_edge(&mut self, _edge: &SimpleEdge, from: &SimpleVertex, to: &SimpleVertex, class: EdgeClass) {
            self.edges.push((from.label(), to.label(), class));
        }

        fn process_vertex_late(&mut self, vertex: &SimpleVertex) {
            self.finished.push(vertex.label());
        }
    }

    fn labeled(graph: &mut SimpleGraph, n: i32) -> Vec<SimpleVertex> {
        (0..n)
            .map(|label| {
                let v = graph.add_vertex();
                v.set_label(label);
                v
            })
            .collect()
    }

    fn labels(list: &RefList<SimpleVertex>) -> Vec<i32> {
        list.iter().map(|v| v.label()).collect()
    }

    /// 0 -> 1, 0 -> 2, 1 -> 3, 2 -> 3, 3 -> 0
    fn diamond_with_back_edge() -> (SimpleGraph, Vec<SimpleVertex>) {
        let mut graph = SimpleGraph::default();
        let v = labeled(&mut graph, 4);
        for (s, t) in [(0, 1), (0, 2), (1, 3), (2, 3), (3, 0)] {
            graph.add_edge(&v[s], &v[t]);
        }
        (graph, v)
    }

    #[test]
    fn test_bfs_order_and_classes() {
        let (graph, v) = diamond_with_back_edge();
        assert_eq!(labels(&breadth_first_order(&graph, &v[0], SearchDirection::Directed)), vec![0, 1, 2, 3]);

        let mut recorder = EdgeRecorder::default();
        BreadthFirstSearch::new(&graph, SearchDirection::Directed).start(&v[0], &mut recorder);
        assert_eq!(
            recorder.edges,
            vec![
                (0, 1, EdgeClass::Tree),
                (0, 2, EdgeClass::Tree),
                (1, 3, EdgeClass::Tree),
                (2, 3, EdgeClass::Cross),
                (3, 0, EdgeClass::Back),
            ]
        );
    }

    #[test]
    fn test_dfs_order_and_classes() {
        let (mut graph, v) = diamond_with_back_edge();
        graph.add_edge(&v[0], &v[3]);
        assert_eq!(labels(&depth_first_order(&graph, &v[0], SearchDirection::Directed)), vec![0, 1, 3, 2]);

        let mut recorder = EdgeRecorder::default();
        DepthFirstSearch::new(&graph, SearchDirection::Directed).start(&v[0], &mut recorder);
        assert_eq!(
            recorder.edges,
            vec![
                (0, 1, EdgeClass::Tree),
                (1, 3, EdgeClass::Tree),
                (3, 0, EdgeClass::Back),
                (0, 2, EdgeClass::Tree),
                (2, 3, EdgeClass::Cross),
                (0, 3, EdgeClass::Forward),
            ]
        );
        assert_eq!(recorder.finished, vec![3, 1, 2, 0]);
    }

    #[test]
    fn test_reversed_and_undirected() {
        let mut graph = SimpleGraph::default();
        let v = labeled(&mut graph, 4);
        graph.add_edge(&v[0], &v[1]);
        graph.add_edge(&v[2], &v[1]);
        graph.add_edge(&v[3], &v[2]);

        assert_eq!(labels(&breadth_first_order(&graph, &v[1], SearchDirection::Directed)), vec![1]);
        assert_eq!(labels(&breadth_first_order(&graph, &v[1], SearchDirection::Reversed)), vec![1, 0, 2, 3]);
        assert_eq!(labels(&depth_first_order(&graph, &v[0], SearchDirection::Undirected)), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_undirected_tree_edge_not_reported_twice() {
        let mut graph = SimpleGraph::default();
        let v = labeled(&mut graph, 2);
        graph.add_edge(&v[0], &v[1]);

        let mut recorder = EdgeRecorder::default();
        BreadthFirstSearch::new(&graph, SearchDirection::Undirected).start(&v[0], &mut recorder);
        assert_eq!(recorder.edges, vec![(0, 1, EdgeClass::Tree)]);

        let mut recorder = EdgeRecorder::default();
        DepthFirstSearch::new(&graph, SearchDirection::Undirected).start(&v[1], &mut recorder);
        assert_eq!(recorder.edges, vec![(1, 0, EdgeClass::Tree)]);
    }

    #[test]
    fn test_self_loop_is_back_edge() {
        let mut graph = SimpleGraph::default();
        let v = labeled(&mut graph, 1);
        graph.add_edge(&v[0], &v[0]);

        let mut bfs_recorder = EdgeRecorder::default();
        BreadthFirstSearch::new(&graph, SearchDirection::Directed).start(&v[0], &mut bfs_recorder);
        let mut dfs_recorder = EdgeRecorder::default();
        DepthFirstSearch::new(&graph, SearchDirection::Directed).start(&v[0], &mut dfs_recorder);
        assert_eq!(bfs_recorder.edges, vec![(0, 0, EdgeClass::Back)]);
        assert_eq!(dfs_recorder.edges, vec![(0, 0, EdgeClass::Back)]);
    }
}
