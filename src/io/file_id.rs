//! Translation between pool ids and positions in a raw file.

use crate::graph::{Edge, GraphIdBimap, Vertex};
use crate::pool::RefPool;
use rustc_hash::FxHashMap;
use std::sync::Arc;

/// Object -> file id, produced while writing.
pub struct ObjectToFileIdMap<O> {
    object_id_to_file_id: FxHashMap<i32, i32>,
    pool: Arc<dyn RefPool<O>>,
}

impl<O> ObjectToFileIdMap<O> {
    pub fn new(object_id_to_file_id: FxHashMap<i32, i32>, pool: Arc<dyn RefPool<O>>) -> Self {
        Self {
            object_id_to_file_id,
            pool,
        }
    }

    pub fn file_id(&self, object: &O) -> Option<i32> {
        self.file_id_of(self.pool.get_id(object))
    }

    pub fn file_id_of(&self, object_id: i32) -> Option<i32> {
        self.object_id_to_file_id.get(&object_id).copied()
    }

    pub fn len(&self) -> usize {
        self.object_id_to_file_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.object_id_to_file_id.is_empty()
    }
}

/// File id -> object, produced while reading.
pub struct FileIdToObjectMap<O> {
    file_id_to_object_id: FxHashMap<i32, i32>,
    pool: Arc<dyn RefPool<O>>,
}

impl<O> FileIdToObjectMap<O> {
    pub fn new(file_id_to_object_id: FxHashMap<i32, i32>, pool: Arc<dyn RefPool<O>>) -> Self {
        Self {
            file_id_to_object_id,
            pool,
        }
    }

    pub fn object_id(&self, file_id: i32) -> Option<i32> {
        self.file_id_to_object_id.get(&file_id).copied()
    }

    pub fn object_into<'a>(&self, file_id: i32, object: &'a mut O) -> Option<&'a mut O> {
        let id = self.object_id(file_id)?;
        Some(self.pool.get_object_into(id, object))
    }

    pub fn object(&self, file_id: i32) -> Option<O> {
        let mut object = self.pool.create_ref();
        if self.object_into(file_id, &mut object).is_some() {
            Some(object)
        } else {
            self.pool.release_ref(object);
            None
        }
    }

    pub fn create_ref(&self) -> O {
        self.pool.create_ref()
    }

    pub fn release_ref(&self, object: O) {
        self.pool.release_ref(object)
    }

    pub fn len(&self) -> usize {
        self.file_id_to_object_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.file_id_to_object_id.is_empty()
    }
}

/// Vertex and edge file ids of a written graph.
pub struct GraphToFileIdMap<V, E> {
    vertices: ObjectToFileIdMap<V>,
    edges: ObjectToFileIdMap<E>,
}

impl<V: Vertex, E: Edge> GraphToFileIdMap<V, E> {
    pub fn new(
        vertex_id_to_file_id: FxHashMap<i32, i32>,
        edge_id_to_file_id: FxHashMap<i32, i32>,
        idmap: &GraphIdBimap<V, E>,
    ) -> Self {
        Self {
            vertices: ObjectToFileIdMap::new(vertex_id_to_file_id, idmap.vertex_id_bimap().clone()),
            edges: ObjectToFileIdMap::new(edge_id_to_file_id, idmap.edge_id_bimap().clone()),
        }
    }

    pub fn vertices(&self) -> &ObjectToFileIdMap<V> {
        &self.vertices
    }

    pub fn edges(&self) -> &ObjectToFileIdMap<E> {
        &self.edges
    }

    pub fn vertex_file_id(&self, vertex: &V) -> Option<i32> {
        self.vertices.file_id(vertex)
    }

    pub fn edge_file_id(&self, edge: &E) -> Option<i32> {
        self.edges.file_id(edge)
    }
}

/// Vertices and edges created while reading a graph, by file id.
pub struct FileIdToGraphMap<V, E> {
    vertices: FileIdToObjectMap<V>,
    edges: FileIdToObjectMap<E>,
}

impl<V: Vertex, E: Edge> FileIdToGraphMap<V, E> {
    pub fn new(
        file_id_to_vertex_id: FxHashMap<i32, i32>,
        file_id_to_edge_id: FxHashMap<i32, i32>,
        idmap: &GraphIdBimap<V, E>,
    ) -> Self {
        Self {
            vertices: FileIdToObjectMap::new(file_id_to_vertex_id, idmap.vertex_id_bimap().clone()),
            edges: FileIdToObjectMap::new(file_id_to_edge_id, idmap.edge_id_bimap().clone()),
        }
    }

    pub fn vertices(&self) -> &FileIdToObjectMap<V> {
        &self.vertices
    }

    pub fn edges(&self) -> &FileIdToObjectMap<E> {
        &self.edges
    }

    pub fn vertex_into<'a>(&self, file_id: i32, vertex: &'a mut V) -> Option<&'a mut V> {
        self.vertices.object_into(file_id, vertex)
    }

    pub fn vertex(&self, file_id: i32) -> Option<V> {
        self.vertices.object(file_id)
    }

    pub fn edge_into<'a>(&self, file_id: i32, edge: &'a mut E) -> Option<&'a mut E> {
        self.edges.object_into(file_id, edge)
    }

    pub fn edge(&self, file_id: i32) -> Option<E> {
        self.edges.object(file_id)
    }
}

impl<O> std::fmt::Debug for FileIdToObjectMap<O> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileIdToObjectMap")
            .field("file_id_to_object_id", &self.file_id_to_object_id)
            .finish_non_exhaustive()
    }
}

impl<V, E> std::fmt::Debug for FileIdToGraphMap<V, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileIdToGraphMap")
            .field("vertices", &self.vertices)
            .field("edges", &self.edges)
            .finish()
    }
}
