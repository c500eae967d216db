//! Concrete vertex and edge types

mod simple;
mod spot;

pub use simple::{ListenableSimpleGraph, SimpleEdge, SimpleGraph, SimpleVertex};
pub use spot::{Link, ModelGraph, Spot, NUM_DIMENSIONS};
