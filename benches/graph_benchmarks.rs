use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use poolgraph::algo::{breadth_first_order, SearchDirection};
use poolgraph::graph::{Graph, ReadOnlyGraph};
use poolgraph::io::{read_raw_graph, write_raw_graph, PoolGraphSerializer, RawReader, RawWriter};
use poolgraph::model::{SimpleEdge, SimpleGraph, SimpleVertex};
use poolgraph::GraphConfig;

/// Ring of `size` vertices where each vertex also links two steps ahead
fn build_graph(size: usize) -> SimpleGraph {
    let mut graph = SimpleGraph::new(&GraphConfig::with_capacity(size, size * 2));
    let vertices: Vec<SimpleVertex> = (0..size)
        .map(|i| {
            let vertex = graph.add_vertex();
            vertex.set_label(i as i32);
            vertex
        })
        .collect();
    for i in 0..size {
        graph.add_edge(&vertices[i], &vertices[(i + 1) % size]);
        graph.add_edge(&vertices[i], &vertices[(i + 2) % size]);
    }
    graph
}

/// Benchmark vertex insertion with a single reused cursor
fn bench_vertex_insertion(c: &mut Criterion) {
    let mut group = c.benchmark_group("vertex_insertion");

    for size in [100, 1000, 10_000].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            b.iter(|| {
                let mut graph = SimpleGraph::default();
                let mut vertex = graph.vertex_ref();
                for i in 0..size {
                    graph.add_vertex_into(&mut vertex).set_label(i as i32);
                }
                criterion::black_box(graph.vertex_count());
            });
        });
    }
    group.finish();
}

/// Benchmark edge insertion, which appends at the tail of both lists
fn bench_edge_insertion(c: &mut Criterion) {
    let mut group = c.benchmark_group("edge_insertion");

    for size in [100, 1000, 10_000].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            b.iter(|| criterion::black_box(build_graph(size).edge_count()));
        });
    }
    group.finish();
}

/// Benchmark a full adjacency sweep without allocating cursors
fn bench_adjacency_sweep(c: &mut Criterion) {
    let mut group = c.benchmark_group("adjacency_sweep");

    for size in [100, 1000, 10_000].iter() {
        let graph = build_graph(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            let mut vertex = graph.vertex_ref();
            let mut target = graph.vertex_ref();
            let mut edge = graph.edge_ref();
            b.iter(|| {
                let mut sum = 0i64;
                let mut vertices = graph.vertices();
                while vertices.next_into(&mut vertex) {
                    let mut edges = graph.outgoing_edges(&vertex);
                    while edges.next_into(&mut edge) {
                        sum += graph.edge_target_into(&edge, &mut target).label() as i64;
                    }
                }
                criterion::black_box(sum);
            });
        });
    }
    group.finish();
}

/// Benchmark breadth-first traversal over the pool graph
fn bench_breadth_first(c: &mut Criterion) {
    let mut group = c.benchmark_group("breadth_first");

    for size in [100, 1000, 10_000].iter() {
        let graph = build_graph(*size);
        let start = graph.vertex_pool().get(0);
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| {
                let order = breadth_first_order(&graph, &start, SearchDirection::Directed);
                criterion::black_box(order.len());
            });
        });
    }
    group.finish();
}

/// Benchmark raw write followed by read into a fresh graph
fn bench_raw_round_trip(c: &mut Criterion) {
    let mut group = c.benchmark_group("raw_round_trip");
    let serializer = PoolGraphSerializer::payload::<SimpleVertex, SimpleEdge>();

    for size in [100, 1000, 10_000].iter() {
        let graph = build_graph(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| {
                let mut out = Vec::new();
                let mut writer = RawWriter::new(&mut out);
                write_raw_graph(&graph, &serializer, &mut writer).unwrap();
                writer.flush().unwrap();

                let mut copy = SimpleGraph::default();
                let mut input = out.as_slice();
                read_raw_graph(&mut copy, &serializer, &mut RawReader::new(&mut input)).unwrap();
                criterion::black_box(copy.edge_count());
            });
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_vertex_insertion,
    bench_edge_insertion,
    bench_adjacency_sweep,
    bench_breadth_first,
    bench_raw_round_trip
);
criterion_main!(benches);
