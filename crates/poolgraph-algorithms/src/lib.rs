pub mod common;
pub mod community;
pub mod pathfinding;

pub use common::{GraphView, NodeId};
pub use community::{weakly_connected_components, WccResult};
pub use pathfinding::{bfs, reachable_from, PathResult};
