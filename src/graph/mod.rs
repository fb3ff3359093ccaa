pub mod directed;
pub mod edge;
pub mod generators;
pub mod layout;
pub mod traits;

pub use directed::DirectedGraph;
pub use edge::{Edge, NodeId};
pub use layout::{Layout, Point};
pub use traits::{Graph, MutableGraph};
