//! Whole-graph raw read and write.

use super::codec::{capacity_hint, RawReader, RawWriter};
use super::file_id::{FileIdToGraphMap, GraphToFileIdMap};
use super::serializer::GraphSerializer;
use super::{GraphIoError, GraphIoResult};
use crate::graph::{Edge, Graph, GraphIdBimap, ReadOnlyGraph, Vertex};
use crate::pool::to_link;
use rustc_hash::FxHashMap;
use tracing::{info, warn};

fn count_to_int(what: &'static str, count: usize) -> GraphIoResult<i32> {
    i32::try_from(count).map_err(|_| GraphIoError::Invalid {
        what,
        value: count as i64,
    })
}

/// Write `graph` as vertex records followed by edge records.
///
/// Vertices are numbered by their position in the output. Edges are written
/// per source vertex in outgoing order, so reading them back in sequence
/// restores every outgoing list in its original order.
pub fn write_raw_graph<V, E, G, S>(
    graph: &G,
    serializer: &S,
    out: &mut RawWriter<'_>,
) -> GraphIoResult<GraphToFileIdMap<V, E>>
where
    V: Vertex,
    E: Edge,
    G: ReadOnlyGraph<V, E>,
    S: GraphSerializer<V, E>,
{
    let idmap = GraphIdBimap::new(graph);

    let num_vertices = graph.vertex_count();
    out.write_int(count_to_int("vertex count", num_vertices)?)?;

    let mut vertex_bytes = vec![0u8; serializer.vertex_num_bytes()];
    let mut vertex_id_to_file_id =
        FxHashMap::with_capacity_and_hasher(num_vertices, Default::default());
    let mut vertex = graph.vertex_ref();
    let mut vertices = graph.vertices();
    let mut file_id = 0;
    while vertices.next_into(&mut vertex) {
        if !vertex_bytes.is_empty() {
            serializer.get_vertex_bytes(&vertex, &mut vertex_bytes);
            out.write_bytes(&vertex_bytes)?;
        }
        vertex_id_to_file_id.insert(idmap.vertex_id(&vertex), file_id);
        file_id += 1;
    }

    let num_edges = graph.edge_count();
    out.write_int(count_to_int("edge count", num_edges)?)?;

    let mut edge_bytes = vec![0u8; serializer.edge_num_bytes()];
    let mut edge_id_to_file_id = FxHashMap::with_capacity_and_hasher(num_edges, Default::default());
    let mut edge = graph.edge_ref();
    let mut vertices = graph.vertices();
    let mut file_id = 0;
    while vertices.next_into(&mut vertex) {
        let from = vertex_id_to_file_id[&idmap.vertex_id(&vertex)];
        let mut outgoing = graph.outgoing_edges(&vertex);
        while outgoing.next_into(&mut edge) {
            let target_id = edge.target_vertex_internal_pool_index();
            let to = match vertex_id_to_file_id.get(&target_id) {
                Some(&to) => to,
                None => {
                    warn!("Edge {} points at unknown vertex {}", idmap.edge_id(&edge), target_id);
                    return Err(GraphIoError::Invalid {
                        what: "edge target",
                        value: target_id as i64,
                    });
                }
            };
            out.write_int(from)?;
            out.write_int(to)?;
            if !edge_bytes.is_empty() {
                serializer.get_edge_bytes(&edge, &mut edge_bytes);
                out.write_bytes(&edge_bytes)?;
            }
            edge_id_to_file_id.insert(idmap.edge_id(&edge), file_id);
            file_id += 1;
        }
    }
    graph.release_edge_ref(edge);
    graph.release_vertex_ref(vertex);

    info!("Wrote raw graph: {} vertices, {} edges", num_vertices, num_edges);
    Ok(GraphToFileIdMap::new(vertex_id_to_file_id, edge_id_to_file_id, &idmap))
}

/// Add the vertices and edges stored in `input` to `graph`.
///
/// Payload bytes are applied before the graph announces each new entity.
/// Fails with [`GraphIoError::DuplicateEdge`] if the graph refuses an edge.
pub fn read_raw_graph<V, E, G, S>(
    graph: &mut G,
    serializer: &S,
    input: &mut RawReader<'_>,
) -> GraphIoResult<FileIdToGraphMap<V, E>>
where
    V: Vertex,
    E: Edge,
    G: Graph<V, E>,
    S: GraphSerializer<V, E>,
{
    let idmap = GraphIdBimap::new(graph);

    let num_vertices = input.read_count("vertex count")?;
    let mut vertex_bytes = vec![0u8; serializer.vertex_num_bytes()];
    let mut file_id_to_vertex_id =
        FxHashMap::with_capacity_and_hasher(capacity_hint(num_vertices), Default::default());
    let mut source = graph.vertex_ref();
    let mut target = graph.vertex_ref();
    for file_id in 0..num_vertices {
        if !vertex_bytes.is_empty() {
            input.read_bytes(&mut vertex_bytes)?;
        }
        graph.add_vertex_with_into(&mut source, |v| {
            if !vertex_bytes.is_empty() {
                serializer.set_vertex_bytes(v, &vertex_bytes);
            }
        });
        serializer.notify_vertex_added(&source);
        file_id_to_vertex_id.insert(to_link(file_id), idmap.vertex_id(&source));
    }

    let num_edges = input.read_count("edge count")?;
    let mut edge_bytes = vec![0u8; serializer.edge_num_bytes()];
    let mut file_id_to_edge_id =
        FxHashMap::with_capacity_and_hasher(capacity_hint(num_edges), Default::default());
    let mut edge = graph.edge_ref();
    for file_id in 0..num_edges {
        let from = input.read_int()?;
        let to = input.read_int()?;
        let source_id = lookup_vertex(&file_id_to_vertex_id, from)?;
        let target_id = lookup_vertex(&file_id_to_vertex_id, to)?;
        if !edge_bytes.is_empty() {
            input.read_bytes(&mut edge_bytes)?;
        }
        idmap.vertex_into(source_id, &mut source);
        idmap.vertex_into(target_id, &mut target);
        let added = graph.add_edge_with_into(&source, &target, &mut edge, |e| {
            if !edge_bytes.is_empty() {
                serializer.set_edge_bytes(e, &edge_bytes);
            }
        });
        if added.is_none() {
            return Err(GraphIoError::DuplicateEdge { from, to });
        }
        serializer.notify_edge_added(&edge);
        file_id_to_edge_id.insert(to_link(file_id), idmap.edge_id(&edge));
    }
    graph.release_edge_ref(edge);
    graph.release_vertex_ref(target);
    graph.release_vertex_ref(source);

    info!("Read raw graph: {} vertices, {} edges", num_vertices, num_edges);
    Ok(FileIdToGraphMap::new(file_id_to_vertex_id, file_id_to_edge_id, &idmap))
}

fn lookup_vertex(file_id_to_vertex_id: &FxHashMap<i32, i32>, file_id: i32) -> GraphIoResult<i32> {
    file_id_to_vertex_id
        .get(&file_id)
        .copied()
        .ok_or(GraphIoError::Invalid {
            what: "vertex file id",
            value: file_id as i64,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GraphConfig;
    use crate::graph::DuplicateEdgePolicy;
    use crate::io::PoolGraphSerializer;
    use crate::model::{SimpleEdge, SimpleGraph, SimpleVertex};

    fn encode(graph: &SimpleGraph) -> Vec<u8> {
        let serializer = PoolGraphSerializer::payload::<SimpleVertex, SimpleEdge>();
        let mut out = Vec::new();
        let mut writer = RawWriter::new(&mut out);
        write_raw_graph(graph, &serializer, &mut writer).unwrap();
        writer.flush().unwrap();
        out
    }

    #[test]
    fn test_layout_of_small_graph() {
        let mut graph = SimpleGraph::default();
        let a = graph.add_vertex();
        a.set_label(5);
        let b = graph.add_vertex();
        b.set_label(6);
        graph.add_edge(&b, &a);

        // counts and file ids are big-endian, labels keep their record encoding
        let expected: Vec<u8> = vec![
            0, 0, 0, 2, //
            5, 0, 0, 0, //
            6, 0, 0, 0, //
            0, 0, 0, 1, //
            0, 0, 0, 1, //
            0, 0, 0, 0,
        ];
        assert_eq!(encode(&graph), expected);
    }

    #[test]
    fn test_file_ids_follow_write_order() {
        let mut graph = SimpleGraph::default();
        let a = graph.add_vertex();
        let b = graph.add_vertex();
        let e = graph.add_edge(&a, &b).unwrap();

        let serializer = PoolGraphSerializer::payload::<SimpleVertex, SimpleEdge>();
        let mut out = Vec::new();
        let mut writer = RawWriter::new(&mut out);
        let ids = write_raw_graph(&graph, &serializer, &mut writer).unwrap();
        assert_eq!(ids.vertex_file_id(&a), Some(0));
        assert_eq!(ids.vertex_file_id(&b), Some(1));
        assert_eq!(ids.edge_file_id(&e), Some(0));
    }

    #[test]
    fn test_rejected_duplicate_is_an_error() {
        let mut graph = SimpleGraph::default();
        let a = graph.add_vertex();
        let b = graph.add_vertex();
        graph.add_edge(&a, &b);
        graph.add_edge(&a, &b);
        let bytes = encode(&graph);

        let config = GraphConfig::default().duplicate_edges(DuplicateEdgePolicy::Reject);
        let mut strict = SimpleGraph::new(&config);
        let serializer = PoolGraphSerializer::payload::<SimpleVertex, SimpleEdge>();
        let mut input = bytes.as_slice();
        let result = read_raw_graph(&mut strict, &serializer, &mut RawReader::new(&mut input));
        assert!(matches!(result, Err(GraphIoError::DuplicateEdge { from: 0, to: 1 })));
    }

    #[test]
    fn test_unknown_vertex_file_id() {
        // one vertex, then an edge 0 -> 3
        let bytes: Vec<u8> = vec![
            0, 0, 0, 1, //
            0, 0, 0, 0, //
            0, 0, 0, 1, //
            0, 0, 0, 0, //
            0, 0, 0, 3,
        ];
        let mut graph = SimpleGraph::default();
        let serializer = PoolGraphSerializer::payload::<SimpleVertex, SimpleEdge>();
        let mut input = bytes.as_slice();
        let result = read_raw_graph(&mut graph, &serializer, &mut RawReader::new(&mut input));
        assert!(matches!(
            result,
            Err(GraphIoError::Invalid { what: "vertex file id", value: 3 })
        ));
    }

    #[test]
    fn test_huge_vertex_count_fails_cleanly() {
        let serializer = PoolGraphSerializer::payload::<SimpleVertex, SimpleEdge>();
        let mut graph = SimpleGraph::default();
        let mut input: &[u8] = &[0x7f, 0xff, 0xff, 0xff];
        let result = read_raw_graph(&mut graph, &serializer, &mut RawReader::new(&mut input));
        assert!(matches!(result, Err(GraphIoError::Io(_))));
        assert_eq!(graph.vertex_count(), 0);
    }

    #[test]
    fn test_huge_edge_count_fails_cleanly() {
        let serializer = PoolGraphSerializer::payload::<SimpleVertex, SimpleEdge>();
        let mut graph = SimpleGraph::default();
        let mut input: &[u8] = &[0, 0, 0, 0, 0x7f, 0xff, 0xff, 0xff];
        let result = read_raw_graph(&mut graph, &serializer, &mut RawReader::new(&mut input));
        assert!(matches!(result, Err(GraphIoError::Io(_))));
    }
}
