/*!
Distance Vector routing simulation over a static, user-defined topology.

A caller constructs a [`DistanceVectorEngine`] with a fixed node set,
registers symmetric weighted links, initializes the tables, then advances
rounds until the engine reports no change (convergence). The [`driver`]
module provides the reference run-to-convergence loop with per-round
snapshot emission; topology construction from external input and snapshot
presentation stay with the caller.
*/

pub mod driver;
pub mod network;
pub mod routing;

pub use driver::{
    ConvergenceReport, DriverError, JsonLinesSink, SimulationDriver, SnapshotSink, TracingSink,
};
pub use network::{Cost, Link, LinkKey, NodeId, Topology, TopologyError};
pub use routing::{
    DistanceVectorEngine, EngineError, EngineState, NetworkSnapshot, Route, RouteRow,
    TableSnapshot,
};
