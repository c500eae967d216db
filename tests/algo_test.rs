use poolgraph::algo::{
    breadth_first_order, build_view, depth_first_order, weakly_connected_components,
    BreadthFirstSearch, EdgeClass, SearchDirection, SearchListener,
};
use poolgraph::graph::{Graph, ReadOnlyGraph};
use poolgraph::model::{ListenableSimpleGraph, SimpleEdge, SimpleVertex};
use poolgraph::pool::PoolObject;

fn chain_with_branch() -> (ListenableSimpleGraph, Vec<SimpleVertex>) {
    // 0 -> 1 -> 2 -> 3, 1 -> 4, 5 isolated
    let mut graph = ListenableSimpleGraph::default();
    let v: Vec<SimpleVertex> = (0..6)
        .map(|label| {
            let vertex = graph.add_vertex();
            vertex.set_label(label);
            vertex
        })
        .collect();
    graph.add_edge(&v[0], &v[1]);
    graph.add_edge(&v[1], &v[2]);
    graph.add_edge(&v[2], &v[3]);
    graph.add_edge(&v[1], &v[4]);
    (graph, v)
}

fn labels(list: poolgraph::collection::RefList<SimpleVertex>) -> Vec<i32> {
    list.iter().map(|v| v.label()).collect()
}

#[test]
fn test_breadth_first_order_on_listenable_graph() {
    let (graph, v) = chain_with_branch();
    let order = breadth_first_order(&graph, &v[0], SearchDirection::Directed);
    assert_eq!(labels(order), vec![0, 1, 2, 4, 3]);

    let reversed = breadth_first_order(&graph, &v[3], SearchDirection::Reversed);
    assert_eq!(labels(reversed), vec![3, 2, 1, 0]);
}

#[test]
fn test_depth_first_order_follows_insertion_order() {
    let (graph, v) = chain_with_branch();
    let order = depth_first_order(&graph, &v[0], SearchDirection::Directed);
    assert_eq!(labels(order), vec![0, 1, 2, 3, 4]);

    let undirected = depth_first_order(&graph, &v[4], SearchDirection::Undirected);
    assert_eq!(labels(undirected), vec![4, 1, 2, 3, 0]);
}

#[derive(Default)]
struct TreeCounter {
    tree: usize,
    other: usize,
}

impl SearchListener<SimpleVertex, SimpleEdge> for TreeCounter {
    fn process_edge(&mut self, _edge: &SimpleEdge, _from: &SimpleVertex, _to: &SimpleVertex, class: EdgeClass) {
        match class {
            EdgeClass::Tree => self.tree += 1,
            _ => self.other += 1,
        }
    }
}

#[test]
fn test_search_reuses_state_across_starts() {
    let (mut graph, v) = chain_with_branch();
    graph.add_edge(&v[3], &v[0]);

    let mut counter = TreeCounter::default();
    let mut search = BreadthFirstSearch::new(&graph, SearchDirection::Directed);
    search.start(&v[0], &mut counter);
    assert_eq!(counter.tree, 4);
    assert_eq!(counter.other, 1);
    assert!(!search.was_discovered(&v[5]));

    search.start(&v[5], &mut counter);
    assert!(search.was_discovered(&v[5]));
    assert_eq!(counter.tree, 4);
}

#[test]
fn test_components_after_vertex_removal() {
    let (mut graph, v) = chain_with_branch();
    graph.remove_vertex(&v[1]);

    let view = build_view(&graph);
    assert_eq!(view.node_count, 5);
    let components = weakly_connected_components(&view);
    assert_eq!(components.sizes(), vec![2, 1, 1, 1]);

    let id = |vertex: &SimpleVertex| vertex.internal_pool_index() as u32;
    assert!(components.connected(id(&v[2]), id(&v[3])));
    assert!(!components.connected(id(&v[0]), id(&v[4])));
    assert_eq!(graph.edge_count(), 1);
}
