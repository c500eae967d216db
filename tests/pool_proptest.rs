use poolgraph::graph::{Edge, Graph, ReadOnlyGraph, VertexPool};
use poolgraph::model::{SimpleGraph, SimpleVertex};
use poolgraph::pool::{Pool, PoolObject, DEFAULT_SLAB_BYTES};
use poolgraph::StorageKind;
use proptest::prelude::*;
use std::collections::BTreeMap;

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

#[derive(Debug, Clone)]
enum Op {
    Create(i32),
    Free(usize),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => any::<i32>().prop_map(Op::Create),
        2 => any::<usize>().prop_map(Op::Free),
    ]
}

fn storage_strategy() -> impl Strategy<Value = StorageKind> {
    prop_oneof![Just(StorageKind::SingleArray), Just(StorageKind::MultiArray)]
}

proptest! {
    #[test]
    fn prop_live_slots_keep_their_content(
        kind in storage_strategy(),
        capacity in 0usize..8,
        ops in prop::collection::vec(op_strategy(), 1..200),
    ) {
        // tiny slabs so multi-array growth crosses many slab boundaries
        let pool = Pool::<SimpleVertex>::with_storage(capacity, kind, 64);
        let mut live: BTreeMap<usize, i32> = BTreeMap::new();
        let mut cursor = pool.create_ref();

        for op in ops {
            match op {
                Op::Create(label) => {
                    pool.create_into(&mut cursor);
                    cursor.set_label(label);
                    prop_assert!(live.insert(cursor.internal_pool_index(), label).is_none());
                }
                Op::Free(selector) => {
                    if live.is_empty() {
                        continue;
                    }
                    let index = *live.keys().nth(selector % live.len()).unwrap();
                    pool.get_into(index, &mut cursor);
                    pool.delete(&cursor);
                    live.remove(&index);
                }
            }
            for (&index, &label) in &live {
                prop_assert_eq!(pool.get_into(index, &mut cursor).label(), label);
            }
        }
        prop_assert_eq!(pool.size(), live.len());
    }

    #[test]
    fn prop_freed_slot_is_reused_first(count in 1usize..64, selector in any::<usize>()) {
        let pool = Pool::<SimpleVertex>::new(count);
        let vertices: Vec<SimpleVertex> = (0..count).map(|_| pool.create()).collect();
        let victim = &vertices[selector % count];
        let index = victim.internal_pool_index();

        pool.delete(victim);
        let capacity = pool.mem_pool().read().capacity();
        let reused = pool.create();
        prop_assert_eq!(reused.internal_pool_index(), index);
        prop_assert_eq!(pool.mem_pool().read().capacity(), capacity);
    }

    #[test]
    fn prop_repointed_cursor_reads_new_slot(a in any::<i32>(), b in any::<i32>()) {
        let pool = Pool::<SimpleVertex>::new(2);
        let first = pool.create();
        let second = pool.create();
        first.set_label(a);
        second.set_label(b);

        let mut cursor = pool.create_ref();
        prop_assert_eq!(pool.get_into(first.internal_pool_index(), &mut cursor).label(), a);
        prop_assert_eq!(pool.get_into(second.internal_pool_index(), &mut cursor).label(), b);
        prop_assert_eq!(first.label(), a);
    }

    #[test]
    fn prop_cascade_leaves_no_dangling_edges(
        num_vertices in 1usize..12,
        edges in prop::collection::vec((any::<usize>(), any::<usize>()), 0..40),
        victim in any::<usize>(),
    ) {
        let mut graph = SimpleGraph::default();
        let v: Vec<SimpleVertex> = (0..num_vertices).map(|_| graph.add_vertex()).collect();
        for (s, t) in &edges {
            graph.add_edge(&v[s % num_vertices], &v[t % num_vertices]).unwrap();
        }

        let removed = &v[victim % num_vertices];
        let removed_link = removed.internal_pool_index() as i32;
        let linked = graph.edges().filter(|e| {
            e.source_vertex_internal_pool_index() == removed_link
                || e.target_vertex_internal_pool_index() == removed_link
        }).count();
        let edge_capacity = graph.edge_pool().pool().mem_pool().read().capacity();

        graph.remove_vertex(removed);

        prop_assert_eq!(graph.edge_count(), edges.len() - linked);
        for vertex in graph.vertices() {
            for e in graph.edges_of(&vertex) {
                prop_assert!(e.source_vertex_internal_pool_index() != removed_link);
                prop_assert!(e.target_vertex_internal_pool_index() != removed_link);
            }
        }
        // freed edge slots come back before the pool grows
        let survivor = graph.vertices().next();
        if let Some(survivor) = survivor {
            for _ in 0..linked {
                graph.add_edge(&survivor, &survivor).unwrap();
            }
            prop_assert_eq!(graph.edge_pool().pool().mem_pool().read().capacity(), edge_capacity);
        }
    }
}

#[test]
fn test_vertex_pool_reuse_then_growth() {
    init_tracing();
    let pool = VertexPool::<SimpleVertex>::with_storage(2, StorageKind::SingleArray, DEFAULT_SLAB_BYTES);
    let v0 = pool.create();
    let v1 = pool.create();
    assert_eq!(v0.internal_pool_index(), 0);
    assert_eq!(v1.internal_pool_index(), 1);

    pool.pool().delete(&v0);
    assert_eq!(pool.create().internal_pool_index(), 0);
    assert_eq!(pool.pool().mem_pool().read().capacity(), 2);

    assert_eq!(pool.create().internal_pool_index(), 2);
    assert!(pool.pool().mem_pool().read().capacity() > 2);
    assert_eq!(pool.size(), 3);
}

#[test]
fn test_multi_array_slots_do_not_straddle_slabs() {
    init_tracing();
    // 12-byte records in 32-byte slabs: two records per slab, 8 bytes unused
    let pool = Pool::<SimpleVertex>::with_storage(1, StorageKind::MultiArray, 32);
    let vertices: Vec<SimpleVertex> = (0..9)
        .map(|label| {
            let v = pool.create();
            v.set_label(label * 3);
            v
        })
        .collect();
    for (label, v) in vertices.iter().enumerate() {
        assert_eq!(v.label(), label as i32 * 3);
    }
}
