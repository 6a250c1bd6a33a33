use std::collections::HashMap;

use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;
use thiserror::Error;

use crate::network::link::{Link, LinkKey};
use crate::network::node::NodeId;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TopologyError {
    #[error("node set must not be empty")]
    EmptyNodeSet,
    #[error("duplicate node: {0}")]
    DuplicateNode(NodeId),
    #[error("unknown node: {0}")]
    UnknownNode(NodeId),
    #[error("link endpoints must be distinct: {0}")]
    SelfLink(NodeId),
    #[error("cost {cost} for link {a}-{b} is reserved as the unreachable sentinel")]
    InvalidCost { a: NodeId, b: NodeId, cost: u32 },
}

/// Static weighted topology: a fixed node set plus symmetric links.
///
/// Nodes live in an undirected petgraph graph; `node_id_to_index_map` maps
/// labels to graph indices so lookups in the hot relaxation loop are plain
/// integer indexing rather than repeated label hashing.
#[derive(Debug, Clone)]
pub struct Topology {
    graph: UnGraph<NodeId, u32>,
    node_id_to_index_map: HashMap<NodeId, NodeIndex>,
}

impl Topology {
    /// Build a topology over a fixed node set with no links yet.
    ///
    /// The set must be non-empty and free of duplicate labels; both
    /// violations are rejected rather than silently repaired.
    pub fn new<I, T>(nodes: I) -> Result<Self, TopologyError>
    where
        I: IntoIterator<Item = T>,
        T: Into<NodeId>,
    {
        let mut graph = UnGraph::new_undirected();
        let mut node_id_to_index_map = HashMap::new();
        for node in nodes {
            let id: NodeId = node.into();
            if node_id_to_index_map.contains_key(&id) {
                return Err(TopologyError::DuplicateNode(id));
            }
            let index = graph.add_node(id.clone());
            node_id_to_index_map.insert(id, index);
        }
        if node_id_to_index_map.is_empty() {
            return Err(TopologyError::EmptyNodeSet);
        }
        Ok(Topology {
            graph,
            node_id_to_index_map,
        })
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Node labels in index (insertion) order.
    pub fn node_ids(&self) -> impl Iterator<Item = &NodeId> {
        self.graph.node_indices().map(|index| &self.graph[index])
    }

    pub fn contains(&self, id: &NodeId) -> bool {
        self.node_id_to_index_map.contains_key(id)
    }

    pub(crate) fn index_of(&self, id: &NodeId) -> Result<NodeIndex, TopologyError> {
        self.node_id_to_index_map
            .get(id)
            .copied()
            .ok_or_else(|| TopologyError::UnknownNode(id.clone()))
    }

    pub(crate) fn id_of(&self, index: NodeIndex) -> &NodeId {
        &self.graph[index]
    }

    pub(crate) fn node_indices(&self) -> impl Iterator<Item = NodeIndex> {
        self.graph.node_indices()
    }

    /// Register (or overwrite) the symmetric link between two distinct member
    /// nodes. Re-adding a pair replaces the previous weight: last write wins,
    /// never a parallel edge.
    pub fn add_link(
        &mut self,
        node1: impl Into<NodeId>,
        node2: impl Into<NodeId>,
        cost: u32,
    ) -> Result<(), TopologyError> {
        let a = node1.into();
        let b = node2.into();
        let a_index = self.index_of(&a)?;
        let b_index = self.index_of(&b)?;
        if a_index == b_index {
            return Err(TopologyError::SelfLink(a));
        }
        if cost == u32::MAX {
            return Err(TopologyError::InvalidCost { a, b, cost });
        }
        self.graph.update_edge(a_index, b_index, cost);
        Ok(())
    }

    /// The direct link weight between two member nodes, `None` when they are
    /// not direct neighbors.
    pub fn cost_between(
        &self,
        node1: &NodeId,
        node2: &NodeId,
    ) -> Result<Option<u32>, TopologyError> {
        let a_index = self.index_of(node1)?;
        let b_index = self.index_of(node2)?;
        Ok(self
            .graph
            .find_edge(a_index, b_index)
            .map(|edge| self.graph[edge]))
    }

    /// All registered links with canonical keys.
    pub fn links(&self) -> impl Iterator<Item = Link> + '_ {
        self.graph.edge_references().map(|edge| Link {
            key: LinkKey::new(
                self.graph[edge.source()].clone(),
                self.graph[edge.target()].clone(),
            ),
            cost: *edge.weight(),
        })
    }

    /// Direct neighbors of a node with their link weights. An edge reference
    /// may be stored in either orientation, so pick whichever endpoint is not
    /// the queried node.
    pub(crate) fn neighbor_costs(
        &self,
        node: NodeIndex,
    ) -> impl Iterator<Item = (NodeIndex, u32)> {
        self.graph.edges(node).map(move |edge| {
            let other = if edge.source() == node {
                edge.target()
            } else {
                edge.source()
            };
            (other, *edge.weight())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn abc() -> Topology {
        Topology::new(["A", "B", "C"]).unwrap()
    }

    #[test]
    fn keeps_nodes_in_insertion_order() {
        let labels: Vec<_> = abc().node_ids().cloned().collect();
        assert_eq!(
            labels,
            vec![NodeId::from("A"), NodeId::from("B"), NodeId::from("C")]
        );
    }

    #[test]
    fn rejects_empty_node_set() {
        let empty: [&str; 0] = [];
        assert!(matches!(
            Topology::new(empty),
            Err(TopologyError::EmptyNodeSet)
        ));
    }

    #[test]
    fn rejects_duplicate_labels() {
        assert_eq!(
            Topology::new(["A", "B", "A"]).unwrap_err(),
            TopologyError::DuplicateNode(NodeId::from("A"))
        );
    }

    #[test]
    fn links_are_symmetric() {
        let mut topology = abc();
        topology.add_link("A", "B", 4).unwrap();
        let a = NodeId::from("A");
        let b = NodeId::from("B");
        assert_eq!(topology.cost_between(&a, &b).unwrap(), Some(4));
        assert_eq!(topology.cost_between(&b, &a).unwrap(), Some(4));
    }

    #[test]
    fn absent_link_reads_as_none() {
        let topology = abc();
        let a = NodeId::from("A");
        let c = NodeId::from("C");
        assert_eq!(topology.cost_between(&a, &c).unwrap(), None);
    }

    #[test]
    fn re_adding_a_pair_overwrites_the_cost() {
        let mut topology = abc();
        topology.add_link("A", "B", 4).unwrap();
        topology.add_link("B", "A", 9).unwrap();
        let a = NodeId::from("A");
        let b = NodeId::from("B");
        assert_eq!(topology.cost_between(&a, &b).unwrap(), Some(9));
        assert_eq!(topology.links().count(), 1);
    }

    #[test]
    fn rejects_unknown_endpoints() {
        let mut topology = abc();
        assert!(topology.contains(&NodeId::from("A")));
        assert!(!topology.contains(&NodeId::from("Z")));
        assert_eq!(
            topology.add_link("A", "Z", 1),
            Err(TopologyError::UnknownNode(NodeId::from("Z")))
        );
    }

    #[test]
    fn rejects_self_links() {
        let mut topology = abc();
        assert_eq!(
            topology.add_link("A", "A", 1),
            Err(TopologyError::SelfLink(NodeId::from("A")))
        );
    }

    #[test]
    fn rejects_the_reserved_sentinel_cost() {
        let mut topology = abc();
        assert!(matches!(
            topology.add_link("A", "B", u32::MAX),
            Err(TopologyError::InvalidCost { cost: u32::MAX, .. })
        ));
    }
}
