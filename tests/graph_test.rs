use parking_lot::Mutex;
use poolgraph::graph::{Edge, Graph, GraphListener, ReadOnlyGraph, Vertex};
use poolgraph::model::{ListenableSimpleGraph, SimpleEdge, SimpleGraph, SimpleVertex};
use poolgraph::pool::{PoolObject, NO_INDEX};
use poolgraph::{DuplicateEdgePolicy, GraphConfig};
use std::sync::Arc;

fn labeled(graph: &mut impl Graph<SimpleVertex, SimpleEdge>, n: i32) -> Vec<SimpleVertex> {
    (0..n)
        .map(|label| {
            let v = graph.add_vertex();
            v.set_label(label);
            v
        })
        .collect()
}

fn target_labels(graph: &SimpleGraph, vertex: &SimpleVertex) -> Vec<i32> {
    graph
        .outgoing_edges(vertex)
        .map(|e| graph.edge_target(&e).label())
        .collect()
}

#[test]
fn test_removing_source_removes_its_edges() {
    let mut graph = SimpleGraph::default();
    let v = labeled(&mut graph, 3);
    graph.add_edge(&v[0], &v[1]).unwrap();
    graph.add_edge(&v[0], &v[2]).unwrap();
    assert_eq!(graph.outgoing_edges(&v[0]).len(), 2);

    graph.remove_vertex(&v[0]);

    assert_eq!(graph.vertex_count(), 2);
    assert_eq!(graph.edge_count(), 0);
    assert_eq!(graph.incoming_edges(&v[1]).len(), 0);
    assert_eq!(graph.incoming_edges(&v[2]).len(), 0);
}

#[test]
fn test_adjacency_round_trip() {
    let mut graph = SimpleGraph::default();
    let v = labeled(&mut graph, 2);
    let e = graph.add_edge(&v[0], &v[1]).unwrap();

    assert!(graph.outgoing_edges(&v[0]).any(|x| x == e));
    assert!(graph.incoming_edges(&v[1]).any(|x| x == e));
    assert_eq!(graph.get_edge(&v[0], &v[1]), Some(e.clone()));
    assert_eq!(graph.get_edge(&v[1], &v[0]), None);
    assert_eq!(graph.edge_source(&e), v[0]);
    assert_eq!(graph.edge_target(&e), v[1]);
}

#[test]
fn test_outgoing_edges_keep_insertion_order() {
    let mut graph = SimpleGraph::default();
    let v = labeled(&mut graph, 4);
    let e1 = graph.add_edge(&v[0], &v[3]).unwrap();
    let e2 = graph.add_edge(&v[0], &v[1]).unwrap();
    let e3 = graph.add_edge(&v[0], &v[2]).unwrap();

    let edges: Vec<SimpleEdge> = graph.outgoing_edges(&v[0]).collect();
    assert_eq!(edges, vec![e1, e2.clone(), e3]);
    assert_eq!(target_labels(&graph, &v[0]), vec![3, 1, 2]);

    // removal in the middle keeps the remaining order
    graph.remove_edge(&e2);
    assert_eq!(target_labels(&graph, &v[0]), vec![3, 2]);
    let e4 = graph.add_edge(&v[0], &v[1]).unwrap();
    assert_eq!(e4, e2, "freed edge slot is reused");
    assert_eq!(target_labels(&graph, &v[0]), vec![3, 2, 1]);
}

#[test]
fn test_edge_view_positional_access() {
    let mut graph = SimpleGraph::default();
    let v = labeled(&mut graph, 3);
    graph.add_edge(&v[0], &v[1]);
    graph.add_edge(&v[0], &v[2]);
    graph.add_edge(&v[2], &v[0]);

    let out = graph.outgoing_edges(&v[0]);
    let mut edge = graph.edge_ref();
    assert!(out.get_into(1, &mut edge).is_some());
    assert_eq!(graph.edge_target(&edge), v[2]);
    assert!(out.get(2).is_none());

    // both lists: outgoing first, then incoming
    let all: Vec<i32> = graph
        .edges_of(&v[0])
        .map(|e| graph.edge_source(&e).label() * 10 + graph.edge_target(&e).label())
        .collect();
    assert_eq!(all, vec![1, 2, 20]);
}

#[test]
fn test_iterator_remove_unlinks_current_edge() {
    let mut graph = SimpleGraph::default();
    let v = labeled(&mut graph, 3);
    graph.add_edge(&v[0], &v[1]);
    graph.add_edge(&v[0], &v[2]);
    graph.add_edge(&v[0], &v[1]);

    let mut edge = graph.edge_ref();
    let mut target = graph.vertex_ref();
    let mut edges = graph.outgoing_edges(&v[0]);
    while edges.next_into(&mut edge) {
        graph.edge_target_into(&edge, &mut target);
        if target.label() == 1 {
            assert!(edges.remove());
        }
    }
    assert!(!edges.remove());

    assert_eq!(target_labels(&graph, &v[0]), vec![2]);
    assert_eq!(graph.incoming_edges(&v[1]).len(), 0);
    assert_eq!(graph.edge_count(), 1);
}

#[test]
fn test_cascade_handles_self_loops_and_shared_targets() {
    let mut graph = SimpleGraph::default();
    let v = labeled(&mut graph, 3);
    graph.add_edge(&v[0], &v[0]);
    graph.add_edge(&v[1], &v[0]);
    graph.add_edge(&v[0], &v[2]);
    graph.add_edge(&v[1], &v[2]);

    graph.remove_vertex(&v[0]);

    assert_eq!(graph.edge_count(), 1);
    assert_eq!(target_labels(&graph, &v[1]), vec![2]);
    assert_eq!(graph.incoming_edges(&v[2]).len(), 1);
    // every freed edge slot is reused before the pool grows
    let before = graph.edge_pool().pool().mem_pool().read().capacity();
    for _ in 0..3 {
        graph.add_edge(&v[1], &v[2]);
    }
    assert_eq!(graph.edge_pool().pool().mem_pool().read().capacity(), before);
}

#[test]
fn test_remove_all_linked_edges_keeps_vertex() {
    let mut graph = SimpleGraph::default();
    let v = labeled(&mut graph, 2);
    graph.add_edge(&v[0], &v[1]);
    graph.add_edge(&v[1], &v[0]);

    graph.remove_all_linked_edges(&v[0]);
    assert_eq!(graph.vertex_count(), 2);
    assert_eq!(graph.edge_count(), 0);
    assert_eq!(v[0].first_out_edge_index(), NO_INDEX);
    assert_eq!(v[0].first_in_edge_index(), NO_INDEX);
    assert!(graph.edges_of(&v[1]).is_empty());
}

#[test]
fn test_duplicate_edge_policies() {
    let mut multigraph = SimpleGraph::default();
    let v = labeled(&mut multigraph, 2);
    let first = multigraph.add_edge(&v[0], &v[1]).unwrap();
    let second = multigraph.add_edge(&v[0], &v[1]).unwrap();
    assert_ne!(first, second);
    assert_eq!(multigraph.get_edge(&v[0], &v[1]), Some(first.clone()));

    let config = GraphConfig::default().duplicate_edges(DuplicateEdgePolicy::Reject);
    let mut strict = SimpleGraph::new(&config);
    let v = labeled(&mut strict, 2);
    let first = strict.add_edge(&v[0], &v[1]).unwrap();
    assert!(strict.add_edge(&v[0], &v[1]).is_none());
    assert_eq!(strict.edge_count(), 1);

    let mut edge = strict.edge_ref();
    assert!(strict.add_edge_into(&v[0], &v[1], &mut edge).is_none());
    assert_eq!(edge, first, "rejected add points at the existing edge");
    assert!(strict.add_edge(&v[1], &v[0]).is_some());
}

#[test]
fn test_clear_resets_both_pools() {
    let mut graph = SimpleGraph::default();
    let v = labeled(&mut graph, 3);
    graph.add_edge(&v[0], &v[1]);
    graph.clear();
    assert_eq!(graph.vertex_count(), 0);
    assert_eq!(graph.edge_count(), 0);
    let fresh = graph.add_vertex();
    assert_eq!(fresh.internal_pool_index(), 0);
    assert!(graph.edges_of(&fresh).is_empty());
}

#[derive(Default)]
struct EventLog {
    events: Mutex<Vec<String>>,
}

impl EventLog {
    fn take(&self) -> Vec<String> {
        std::mem::take(&mut *self.events.lock())
    }
}

impl GraphListener<SimpleVertex, SimpleEdge> for EventLog {
    fn graph_rebuilt(&self) {
        self.events.lock().push("rebuilt".to_string());
    }

    fn vertex_added(&self, vertex: &SimpleVertex) {
        self.events.lock().push(format!("+v{}", vertex.label()));
    }

    fn vertex_removed(&self, vertex: &SimpleVertex) {
        self.events.lock().push(format!("-v{}", vertex.label()));
    }

    fn edge_added(&self, edge: &SimpleEdge) {
        self.events.lock().push(format!("+e{}", edge.internal_pool_index()));
    }

    fn edge_removed(&self, edge: &SimpleEdge) {
        // still readable at this point
        let source = edge.source_vertex_internal_pool_index();
        let target = edge.target_vertex_internal_pool_index();
        self.events.lock().push(format!("-e{}:{}->{}", edge.internal_pool_index(), source, target));
    }
}


#[test]
fn test_listener_event_sequence() {
    let mut graph = ListenableSimpleGraph::default();
    let log = Arc::new(EventLog::default());
    assert!(graph.add_graph_listener(log.clone()));
    assert!(!graph.add_graph_listener(log.clone()));

    let mut a = graph.vertex_ref();
    graph.add_vertex_with_into(&mut a, |v| v.set_label(7));
    let b = graph.add_vertex();
    graph.add_edge(&a, &b).unwrap();
    graph.add_edge(&b, &b).unwrap();
    graph.add_edge(&b, &a).unwrap();
    assert_eq!(log.take(), vec!["+v7", "+v0", "+e0", "+e1", "+e2"]);

    graph.remove_vertex(&b);
    assert_eq!(log.take(), vec!["-e1:1->1", "-e2:1->0", "-e0:0->1", "-v0"]);

    graph.clear();
    assert_eq!(log.take(), vec!["rebuilt"]);

    let listener: Arc<dyn GraphListener<SimpleVertex, SimpleEdge>> = log.clone();
    assert!(graph.remove_graph_listener(&listener));
    graph.add_vertex();
    assert!(log.take().is_empty());
}

#[test]
fn test_paused_listeners_get_single_rebuild() {
    let mut graph = ListenableSimpleGraph::default();
    let log = Arc::new(EventLog::default());
    graph.add_graph_listener(log.clone());

    graph.pause_listeners();
    assert!(graph.is_paused());
    let v = labeled(&mut graph, 3);
    graph.add_edge(&v[0], &v[1]);
    graph.remove_vertex(&v[2]);
    assert!(log.take().is_empty());

    graph.resume_listeners();
    assert!(!graph.is_paused());
    assert_eq!(log.take(), vec!["rebuilt"]);
    assert_eq!(graph.vertex_count(), 2);
    assert_eq!(graph.edge_count(), 1);
}

#[test]
fn test_collections_from_graph_factories() {
    let mut graph = SimpleGraph::default();
    let v = labeled(&mut graph, 3);

    let mut list = graph.create_vertex_list();
    list.add(&v[2]);
    list.add(&v[0]);
    let mut cursor = graph.vertex_ref();
    assert_eq!(list.get_into(0, &mut cursor).label(), 2);

    let mut map = graph.create_vertex_vertex_map();
    map.put(&v[0], &v[1]);
    assert_eq!(map.get(&v[0]).map(|x| x.label()), Some(1));

    let mut depth = graph.create_vertex_int_map(-1);
    depth.put(&v[1], 4);
    assert_eq!(depth.get(&v[1]), 4);
    assert_eq!(depth.get(&v[2]), -1);

    let mut by_label = graph.create_int_vertex_map();
    for vertex in &v {
        by_label.put(vertex.label() * 100, vertex);
    }
    assert_eq!(by_label.get(200), Some(v[2].clone()));

    let e = graph.add_edge(&v[0], &v[1]).unwrap();
    let mut edges = graph.create_edge_set();
    assert!(edges.insert(&e));
    assert!(edges.contains(&graph.get_edge(&v[0], &v[1]).unwrap()));
}

#[test]
fn test_iterator_remove_bypasses_listeners() {
    let mut graph = ListenableSimpleGraph::default();
    let log = Arc::new(EventLog::default());
    let v = labeled(&mut graph, 2);
    let kept = graph.add_edge(&v[0], &v[1]).unwrap();
    graph.add_edge(&v[1], &v[0]).unwrap();
    graph.add_graph_listener(log.clone());

    let mut edges = graph.outgoing_edges(&v[1]);
    assert!(edges.next().is_some());
    assert!(edges.remove());
    assert!(log.take().is_empty());

    graph.remove_edge(&kept);
    assert_eq!(log.take(), vec!["-e0:0->1"]);
    assert_eq!(graph.edge_count(), 0);
}
