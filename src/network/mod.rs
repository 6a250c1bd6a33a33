/*!
This module defines the static network model the simulation runs over:
opaque node labels, symmetric weighted links, and the topology graph that
holds them.
*/

pub mod link;
pub mod node;
pub mod topology;

pub use link::{Cost, Link, LinkKey};
pub use node::NodeId;
pub use topology::{Topology, TopologyError};
