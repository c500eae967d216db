//! Poolgraph
//!
//! A directed multigraph whose vertices and edges live as fixed-size
//! records in growable slabs, addressed through reusable cursors.
//!
//! # Architecture
//!
//! - [`pool`]: slab allocator (`MemPool`), byte-level record access and
//!   typed cursor pools with an idle-cursor queue
//! - [`graph`]: vertex and edge pools with intrusive, index-linked adjacency
//!   lists, the `GraphImp` facade and the listenable wrapper
//! - [`collection`]: lists, sets, deques and maps of pool objects keyed by
//!   pool id
//! - [`properties`]: per-entity property maps with automatic cleanup
//! - [`io`]: raw binary graph and property map persistence
//! - [`model`]: concrete entity types (`SimpleVertex`, `Spot`, ...)
//! - [`algo`]: allocation-free traversals and CSR-based analytics
//!
//! Every call that yields an entity has two forms: one returning a fresh
//! cursor, and an `_into` form that repoints a cursor the caller owns.
//!
//! ## Example Usage
//!
//! ```rust
//! use poolgraph::graph::{Graph, ReadOnlyGraph};
//! use poolgraph::model::SimpleGraph;
//!
//! let mut graph = SimpleGraph::default();
//! let a = graph.add_vertex();
//! let b = graph.add_vertex();
//! a.set_label(1);
//! b.set_label(2);
//! graph.add_edge(&a, &b).unwrap();
//!
//! // Walk the outgoing list with a single reused cursor
//! let mut edge = graph.edge_ref();
//! let mut target = graph.vertex_ref();
//! let mut edges = graph.outgoing_edges(&a);
//! while edges.next_into(&mut edge) {
//!     graph.edge_target_into(&edge, &mut target);
//!     assert_eq!(target.label(), 2);
//! }
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]

pub mod algo;
pub mod collection;
pub mod config;
pub mod graph;
pub mod io;
pub mod model;
pub mod pool;
pub mod properties;

pub use config::{ConfigError, ConfigResult, GraphConfig};
pub use graph::{
    DuplicateEdgePolicy, Edge, Graph, GraphImp, GraphListener, ListenableGraph, ReadOnlyGraph,
    Vertex,
};
pub use io::{GraphIoError, GraphIoResult};
pub use pool::{MemPool, Pool, PoolObject, RefPool, StorageKind};
