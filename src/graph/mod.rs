//! Directed multigraph on top of the slot pools
//!
//! Vertices and edges are pool records. Adjacency is threaded through the
//! records themselves: each vertex stores the heads of its outgoing and
//! incoming lists, each edge stores the next edge in both lists it belongs
//! to. There is no other adjacency structure.

pub mod edge;
pub mod edge_pool;
pub mod edges;
pub mod graph_imp;
pub mod id_bimap;
pub mod listenable;
pub mod vertex;
pub mod vertex_pool;

use serde::{Deserialize, Serialize};

pub use edge::{Edge, EDGE_HEADER_SIZE};
pub use edge_pool::EdgePool;
pub use edges::{Direction, Edges};
pub use graph_imp::{Graph, GraphImp, ReadOnlyGraph};
pub use id_bimap::GraphIdBimap;
pub use listenable::{GraphListener, ListenableGraph};
pub use vertex::{Vertex, VERTEX_HEADER_SIZE};
pub use vertex_pool::VertexPool;

/// What `add_edge` does when an edge with the same source and target exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicateEdgePolicy {
    /// Add another parallel edge (multigraph).
    #[default]
    Allow,
    /// Leave the graph unchanged and report "not added".
    Reject,
}
