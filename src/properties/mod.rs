//! Per-entity property maps
//!
//! Values are keyed by pool id, so a map never holds a cursor. Removing an
//! entity from the graph leaves its id free for reuse; register the map's
//! cleanup listener on a [`ListenableGraph`](crate::graph::ListenableGraph)
//! so stale values are dropped together with their entity.

mod cleanup;
mod obj_map;

pub use cleanup::{EdgePropertyCleanup, VertexPropertyCleanup};
pub use obj_map::{DoublePropertyMap, IntPropertyMap, ObjPropertyMap, PrimitivePropertyMap};

/// Operations shared by every property map, independent of the value type.
pub trait PropertyMap<O>: Send + Sync {
    /// Drop the value of `obj`, if any.
    fn remove_property(&self, obj: &O);

    fn clear_properties(&self);

    fn property_count(&self) -> usize;
}
