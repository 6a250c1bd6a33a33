use petgraph::graph::NodeIndex;

use crate::network::link::Cost;

/// Best-known route to one destination: accumulated cost plus the direct
/// neighbor to forward through. `next_hop` is `None` exactly while the
/// destination is unreachable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteEntry {
    pub cost: Cost,
    pub next_hop: Option<NodeIndex>,
}

impl RouteEntry {
    pub const UNREACHABLE: RouteEntry = RouteEntry {
        cost: Cost::INFINITE,
        next_hop: None,
    };
}

/// One node's routing table: a dense vector of entries indexed by destination
/// node index, so the relaxation loop never hashes labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutingTable {
    entries: Vec<RouteEntry>,
}

impl RoutingTable {
    pub(crate) fn unreachable(node_count: usize) -> Self {
        RoutingTable {
            entries: vec![RouteEntry::UNREACHABLE; node_count],
        }
    }

    pub fn entry(&self, destination: NodeIndex) -> RouteEntry {
        self.entries[destination.index()]
    }

    pub(crate) fn set(&mut self, destination: NodeIndex, entry: RouteEntry) {
        self.entries[destination.index()] = entry;
    }

    pub fn entries(&self) -> impl Iterator<Item = (NodeIndex, RouteEntry)> {
        self.entries
            .iter()
            .enumerate()
            .map(|(index, entry)| (NodeIndex::new(index), *entry))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_all_unreachable() {
        let table = RoutingTable::unreachable(3);
        for (_, entry) in table.entries() {
            assert_eq!(entry, RouteEntry::UNREACHABLE);
        }
    }

    #[test]
    fn set_and_read_back() {
        let mut table = RoutingTable::unreachable(2);
        let entry = RouteEntry {
            cost: Cost::from(5),
            next_hop: Some(NodeIndex::new(1)),
        };
        table.set(NodeIndex::new(0), entry);
        assert_eq!(table.entry(NodeIndex::new(0)), entry);
        assert_eq!(table.entry(NodeIndex::new(1)), RouteEntry::UNREACHABLE);
    }
}
