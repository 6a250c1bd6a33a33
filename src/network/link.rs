use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::network::node::NodeId;

/// Reserved raw value meaning "unreachable". Link weights must stay below it.
const INFINITE: u32 = u32::MAX;

/// Accumulated path cost. `Cost::INFINITE` is the unreachable sentinel; all
/// arithmetic saturates into it, so infinity plus any link weight is still
/// infinity and near-overflow sums clamp instead of wrapping. Because the
/// sentinel is the numeric maximum, it never compares less than a finite cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cost(u32);

impl Cost {
    pub const ZERO: Cost = Cost(0);
    pub const INFINITE: Cost = Cost(INFINITE);

    pub fn is_finite(&self) -> bool {
        self.0 != INFINITE
    }

    /// The raw value for finite costs, `None` when unreachable.
    pub fn value(&self) -> Option<u32> {
        if self.is_finite() { Some(self.0) } else { None }
    }

    /// Extend this cost by one link weight. Infinite stays infinite.
    pub fn saturating_add(self, link_weight: u32) -> Cost {
        if self.is_finite() {
            Cost(self.0.saturating_add(link_weight))
        } else {
            Cost::INFINITE
        }
    }
}

impl From<u32> for Cost {
    fn from(value: u32) -> Self {
        Cost(value)
    }
}

impl Display for Cost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.value() {
            Some(v) => write!(f, "{v}"),
            None => f.write_str("inf"),
        }
    }
}

/// Canonical key for an undirected link: endpoints are stored sorted so
/// (A, B) and (B, A) collapse to the same key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LinkKey {
    a: NodeId,
    b: NodeId,
}

impl LinkKey {
    pub fn new(a: NodeId, b: NodeId) -> Self {
        let (a, b) = if a < b { (a, b) } else { (b, a) };
        LinkKey { a, b }
    }

    pub fn endpoints(&self) -> (&NodeId, &NodeId) {
        (&self.a, &self.b)
    }
}

/// A registered bidirectional link and its symmetric weight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub key: LinkKey,
    pub cost: u32,
}
