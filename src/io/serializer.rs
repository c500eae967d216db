//! Fixed-size payload (de)serialization for vertex and edge records.

use crate::graph::{Edge, Vertex, EDGE_HEADER_SIZE, VERTEX_HEADER_SIZE};
use crate::pool::{MappedElement, PoolObject};

/// Payload bytes of one object type. The adjacency header is never part of
/// the payload; it is rebuilt when edges are re-added.
pub trait ObjectSerializer<O> {
    fn num_bytes(&self) -> usize;

    /// Fill `bytes` (exactly `num_bytes()` long) from `obj`.
    fn get_bytes(&self, obj: &O, bytes: &mut [u8]);

    /// Overwrite the payload of `obj` from `bytes`.
    fn set_bytes(&self, obj: &O, bytes: &[u8]);

    /// Called once `obj` is fully restored.
    fn notify_added(&self, _obj: &O) {}
}

/// Payload bytes of both entity types of a graph.
pub trait GraphSerializer<V, E> {
    fn vertex_num_bytes(&self) -> usize;

    fn get_vertex_bytes(&self, vertex: &V, bytes: &mut [u8]);

    fn set_vertex_bytes(&self, vertex: &V, bytes: &[u8]);

    fn notify_vertex_added(&self, _vertex: &V) {}

    fn edge_num_bytes(&self) -> usize;

    fn get_edge_bytes(&self, edge: &E, bytes: &mut [u8]);

    fn set_edge_bytes(&self, edge: &E, bytes: &[u8]);

    fn notify_edge_added(&self, _edge: &E) {}
}

/// Copies a contiguous byte range of a pool record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolObjectSerializer {
    offset: usize,
    num_bytes: usize,
}

impl PoolObjectSerializer {
    pub fn new(offset: usize, num_bytes: usize) -> Self {
        Self { offset, num_bytes }
    }

    /// Everything in a vertex record after the adjacency header.
    pub fn vertex_payload<V: Vertex>() -> Self {
        Self::new(VERTEX_HEADER_SIZE, V::SIZE_IN_BYTES - VERTEX_HEADER_SIZE)
    }

    /// Everything in an edge record after the adjacency header.
    pub fn edge_payload<E: Edge>() -> Self {
        Self::new(EDGE_HEADER_SIZE, E::SIZE_IN_BYTES - EDGE_HEADER_SIZE)
    }

    pub fn offset(&self) -> usize {
        self.offset
    }
}

impl<O: PoolObject> ObjectSerializer<O> for PoolObjectSerializer {
    fn num_bytes(&self) -> usize {
        self.num_bytes
    }

    fn get_bytes(&self, obj: &O, bytes: &mut [u8]) {
        obj.access().read_bytes(self.offset, &mut bytes[..self.num_bytes]);
    }

    fn set_bytes(&self, obj: &O, bytes: &[u8]) {
        obj.access().write_bytes(self.offset, &bytes[..self.num_bytes]);
    }
}

/// [`GraphSerializer`] built from one [`ObjectSerializer`] per entity type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolGraphSerializer<VS = PoolObjectSerializer, ES = PoolObjectSerializer> {
    vertices: VS,
    edges: ES,
}

impl<VS, ES> PoolGraphSerializer<VS, ES> {
    pub fn new(vertices: VS, edges: ES) -> Self {
        Self { vertices, edges }
    }
}

impl PoolGraphSerializer {
    /// Serialize the full payload of both record types.
    pub fn payload<V: Vertex, E: Edge>() -> Self {
        Self::new(
            PoolObjectSerializer::vertex_payload::<V>(),
            PoolObjectSerializer::edge_payload::<E>(),
        )
    }
}

impl<V, E, VS, ES> GraphSerializer<V, E> for PoolGraphSerializer<VS, ES>
where
    VS: ObjectSerializer<V>,
    ES: ObjectSerializer<E>,
{
    fn vertex_num_bytes(&self) -> usize {
        self.vertices.num_bytes()
    }

    fn get_vertex_bytes(&self, vertex: &V, bytes: &mut [u8]) {
        self.vertices.get_bytes(vertex, bytes)
    }

    fn set_vertex_bytes(&self, vertex: &V, bytes: &[u8]) {
        self.vertices.set_bytes(vertex, bytes)
    }

    fn notify_vertex_added(&self, vertex: &V) {
        self.vertices.notify_added(vertex)
    }

    fn edge_num_bytes(&self) -> usize {
        self.edges.num_bytes()
    }

    fn get_edge_bytes(&self, edge: &E, bytes: &mut [u8]) {
        self.edges.get_bytes(edge, bytes)
    }

    fn set_edge_bytes(&self, edge: &E, bytes: &[u8]) {
        self.edges.set_bytes(edge, bytes)
    }

    fn notify_edge_added(&self, edge: &E) {
        self.edges.notify_added(edge)
    }
}
