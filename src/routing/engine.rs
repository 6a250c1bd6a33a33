/*!
The Distance Vector engine.

Each node keeps a table of best-known (cost, next-hop) entries for every
destination and repeatedly relaxes them against its direct neighbors'
tables. One `advance_round` call is a full synchronous pass over every
(node, neighbor, destination) triple; the engine converges when a pass
changes nothing.
*/

use thiserror::Error;
use tracing::debug;

use crate::network::link::Cost;
use crate::network::node::NodeId;
use crate::network::topology::{Topology, TopologyError};
use crate::routing::snapshot::{NetworkSnapshot, RouteRow, TableSnapshot};
use crate::routing::table::{RouteEntry, RoutingTable};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error(transparent)]
    Topology(#[from] TopologyError),
    #[error("initialize() may only be called once, before the first round")]
    AlreadyInitialized,
    #[error("advance_round() called before initialize()")]
    NotInitialized,
    #[error("links cannot be added once initialize() has run")]
    TopologySealed,
}

/// Engine lifecycle. `Converged` is entered the first time a round reports
/// no change; further rounds are safe no-ops.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    Uninitialized,
    Initialized,
    Converged,
}

/// A resolved routing-table entry for external callers: label next-hop
/// instead of the internal graph index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub cost: Cost,
    pub next_hop: Option<NodeId>,
}

/// Simulates Distance Vector routing over a static topology.
///
/// The node set is fixed at construction; links may be registered until
/// `initialize` runs, after which the topology is sealed and only rounds
/// mutate state.
#[derive(Debug, Clone)]
pub struct DistanceVectorEngine {
    topology: Topology,
    tables: Vec<RoutingTable>,
    state: EngineState,
    round: u64,
}

impl DistanceVectorEngine {
    /// Build an engine over a fixed node set. Every routing-table entry,
    /// self-entries included, starts unreachable; duplicate labels and
    /// empty sets are rejected.
    pub fn new<I, T>(nodes: I) -> Result<Self, EngineError>
    where
        I: IntoIterator<Item = T>,
        T: Into<NodeId>,
    {
        let topology = Topology::new(nodes)?;
        let node_count = topology.node_count();
        let tables = vec![RoutingTable::unreachable(node_count); node_count];
        Ok(DistanceVectorEngine {
            topology,
            tables,
            state: EngineState::Uninitialized,
            round: 0,
        })
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    /// Rounds executed so far, the confirming no-change pass included.
    pub fn rounds(&self) -> u64 {
        self.round
    }

    pub fn node_count(&self) -> usize {
        self.topology.node_count()
    }

    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    /// Register a symmetric link. Only valid before `initialize`; the
    /// topology is sealed once the simulation has begun.
    pub fn add_link(
        &mut self,
        node1: impl Into<NodeId>,
        node2: impl Into<NodeId>,
        cost: u32,
    ) -> Result<(), EngineError> {
        if self.state != EngineState::Uninitialized {
            return Err(EngineError::TopologySealed);
        }
        self.topology.add_link(node1, node2, cost)?;
        Ok(())
    }

    /// Set every node's self-entry to (0, itself), leaving all other entries
    /// unreachable. Must run exactly once before the first round; a second
    /// call is rejected rather than silently resetting mid-simulation.
    pub fn initialize(&mut self) -> Result<(), EngineError> {
        if self.state != EngineState::Uninitialized {
            return Err(EngineError::AlreadyInitialized);
        }
        for node in self.topology.node_indices() {
            self.tables[node.index()].set(
                node,
                RouteEntry {
                    cost: Cost::ZERO,
                    next_hop: Some(node),
                },
            );
        }
        self.state = EngineState::Initialized;
        Ok(())
    }

    /// Execute one full synchronous round and report whether any entry
    /// changed.
    ///
    /// Every (node, neighbor, destination) triple is scanned; there is no
    /// early exit, since later triples may still relax. An entry is replaced
    /// only by a strictly cheaper candidate, so equal-cost alternatives never
    /// disturb the recorded next-hop and costs are monotonically
    /// non-increasing across rounds. Unreachable neighbor entries are skipped
    /// before the addition and the addition itself saturates, so the infinite
    /// sentinel can never wrap into a finite cost. Once converged, further
    /// calls return `false` without scanning or advancing the round counter.
    pub fn advance_round(&mut self) -> Result<bool, EngineError> {
        if self.state == EngineState::Uninitialized {
            return Err(EngineError::NotInitialized);
        }
        if self.state == EngineState::Converged {
            // Fixed point: nothing can relax further, and the round counter
            // stays frozen so repeated calls are true no-ops.
            return Ok(false);
        }
        let topology = &self.topology;
        let tables = &mut self.tables;
        let mut updated = false;
        for node in topology.node_indices() {
            for (neighbor, link_weight) in topology.neighbor_costs(node) {
                for destination in topology.node_indices() {
                    let via_neighbor = tables[neighbor.index()].entry(destination).cost;
                    if !via_neighbor.is_finite() {
                        continue;
                    }
                    let candidate = via_neighbor.saturating_add(link_weight);
                    if candidate < tables[node.index()].entry(destination).cost {
                        tables[node.index()].set(
                            destination,
                            RouteEntry {
                                cost: candidate,
                                next_hop: Some(neighbor),
                            },
                        );
                        updated = true;
                    }
                }
            }
        }
        self.round += 1;
        if !updated {
            self.state = EngineState::Converged;
            debug!(rounds = self.round, "routing tables converged");
        }
        Ok(updated)
    }

    /// The current best-known route from `source` to `destination`.
    pub fn route(
        &self,
        source: impl Into<NodeId>,
        destination: impl Into<NodeId>,
    ) -> Result<Route, EngineError> {
        let source = source.into();
        let destination = destination.into();
        let source_index = self.topology.index_of(&source)?;
        let destination_index = self.topology.index_of(&destination)?;
        let entry = self.tables[source_index.index()].entry(destination_index);
        Ok(Route {
            cost: entry.cost,
            next_hop: entry.next_hop.map(|hop| self.topology.id_of(hop).clone()),
        })
    }

    /// Direct read access to one node's table.
    pub fn table(&self, node: &NodeId) -> Result<&RoutingTable, EngineError> {
        let index = self.topology.index_of(node)?;
        Ok(&self.tables[index.index()])
    }

    /// A serializable view of every table as of the current round.
    pub fn snapshot(&self) -> NetworkSnapshot {
        let tables = self
            .topology
            .node_indices()
            .map(|node| TableSnapshot {
                node: self.topology.id_of(node).clone(),
                routes: self.tables[node.index()]
                    .entries()
                    .map(|(destination, entry)| RouteRow {
                        destination: self.topology.id_of(destination).clone(),
                        cost: entry.cost.value(),
                        next_hop: entry.next_hop.map(|hop| self.topology.id_of(hop).clone()),
                    })
                    .collect(),
            })
            .collect();
        NetworkSnapshot {
            round: self.round,
            tables,
        }
    }
}
