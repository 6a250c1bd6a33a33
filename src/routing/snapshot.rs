/*!
Serializable per-round views of the routing state. The engine produces one
`NetworkSnapshot` per round for external consumers (logging sinks, JSON
writers); the core algorithm never reads these back.
*/

use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::network::node::NodeId;

/// One routing-table row: `cost` is `None` while the destination is
/// unreachable, and `next_hop` is absent in exactly the same cases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteRow {
    pub destination: NodeId,
    pub cost: Option<u32>,
    pub next_hop: Option<NodeId>,
}

/// A single node's table, rows in node-index order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSnapshot {
    pub node: NodeId,
    pub routes: Vec<RouteRow>,
}

/// All routing tables as of the end of `round` (round 0 is the freshly
/// initialized state).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkSnapshot {
    pub round: u64,
    pub tables: Vec<TableSnapshot>,
}

impl Display for NetworkSnapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for table in &self.tables {
            write!(f, "{}:", table.node)?;
            for row in &table.routes {
                match (row.cost, &row.next_hop) {
                    (Some(cost), Some(hop)) => {
                        write!(f, " {}=({} via {})", row.destination, cost, hop)?
                    }
                    _ => write!(f, " {}=(inf)", row.destination)?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
