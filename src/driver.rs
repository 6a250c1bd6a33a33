/*!
Reference driver for the engine: repeatedly advances rounds until the
engine reports no change, emitting a routing-table snapshot after every
round through a pluggable sink. The loop is bounded — node_count rounds by
default (the Bellman-Ford N-1 update rounds plus the confirming pass) — so
a topology that never settles surfaces as an error instead of spinning.
*/

use std::io::Write;

use thiserror::Error;
use tracing::info;

use crate::routing::engine::{DistanceVectorEngine, EngineError, EngineState};
use crate::routing::snapshot::NetworkSnapshot;

#[derive(Debug, Error)]
pub enum DriverError {
    #[error(transparent)]
    Engine(#[from] EngineError),
    #[error("tables still changing after {0} rounds")]
    RoundLimitExceeded(usize),
    #[error("snapshot sink i/o: {0}")]
    SinkIo(#[from] std::io::Error),
    #[error("snapshot serialization: {0}")]
    SinkEncode(#[from] serde_json::Error),
}

/// Receives the routing-table snapshot produced after each round.
pub trait SnapshotSink {
    fn on_round(&mut self, snapshot: &NetworkSnapshot) -> Result<(), DriverError>;
}

/// Emits each snapshot through `tracing` at info level.
pub struct TracingSink;

impl SnapshotSink for TracingSink {
    fn on_round(&mut self, snapshot: &NetworkSnapshot) -> Result<(), DriverError> {
        info!(round = snapshot.round, tables = %snapshot, "routing state");
        Ok(())
    }
}

/// Writes one JSON object per round to the wrapped writer.
pub struct JsonLinesSink<W: Write> {
    writer: W,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        JsonLinesSink { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> SnapshotSink for JsonLinesSink<W> {
    fn on_round(&mut self, snapshot: &NetworkSnapshot) -> Result<(), DriverError> {
        serde_json::to_writer(&mut self.writer, snapshot)?;
        self.writer.write_all(b"\n")?;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConvergenceReport {
    /// Rounds executed, the confirming no-change pass included.
    pub rounds: u64,
}

/// Caller-driven convergence loop over a [`DistanceVectorEngine`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SimulationDriver {
    max_rounds: Option<usize>,
}

impl SimulationDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the default node_count round bound.
    pub fn with_round_limit(max_rounds: usize) -> Self {
        SimulationDriver {
            max_rounds: Some(max_rounds),
        }
    }

    /// Run the engine to its fixed point. A freshly constructed engine is
    /// initialized here; an already-initialized one is picked up as-is. The
    /// sink sees the round-0 snapshot first, then one snapshot per round.
    pub fn run(
        &self,
        engine: &mut DistanceVectorEngine,
        sink: &mut dyn SnapshotSink,
    ) -> Result<ConvergenceReport, DriverError> {
        if engine.state() == EngineState::Uninitialized {
            engine.initialize()?;
        }
        sink.on_round(&engine.snapshot())?;
        let bound = self.max_rounds.unwrap_or(engine.node_count());
        for _ in 0..bound {
            let changed = engine.advance_round()?;
            sink.on_round(&engine.snapshot())?;
            if !changed {
                return Ok(ConvergenceReport {
                    rounds: engine.rounds(),
                });
            }
        }
        Err(DriverError::RoundLimitExceeded(bound))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::node::NodeId;

    struct CollectingSink {
        snapshots: Vec<NetworkSnapshot>,
    }

    impl SnapshotSink for CollectingSink {
        fn on_round(&mut self, snapshot: &NetworkSnapshot) -> Result<(), DriverError> {
            self.snapshots.push(snapshot.clone());
            Ok(())
        }
    }

    fn chain_engine() -> DistanceVectorEngine {
        let mut engine = DistanceVectorEngine::new(["A", "B", "C"]).unwrap();
        engine.add_link("A", "B", 1).unwrap();
        engine.add_link("B", "C", 1).unwrap();
        engine
    }

    #[test]
    fn runs_to_convergence_and_reports_each_round() {
        let mut engine = chain_engine();
        let mut sink = CollectingSink { snapshots: Vec::new() };
        let report = SimulationDriver::new().run(&mut engine, &mut sink).unwrap();

        assert_eq!(engine.state(), EngineState::Converged);
        // Round-0 snapshot plus one per executed round.
        assert_eq!(sink.snapshots.len() as u64, report.rounds + 1);
        assert_eq!(sink.snapshots[0].round, 0);

        // Round 0 is the freshly initialized state: only self-entries set.
        for table in &sink.snapshots[0].tables {
            for row in &table.routes {
                if row.destination == table.node {
                    assert_eq!(row.cost, Some(0));
                    assert_eq!(row.next_hop.as_ref(), Some(&table.node));
                } else {
                    assert_eq!(row.cost, None);
                }
            }
        }

        assert_eq!(sink.snapshots.last().unwrap().tables, engine.snapshot().tables);
    }

    #[test]
    fn accepts_an_already_initialized_engine() {
        let mut engine = chain_engine();
        engine.initialize().unwrap();
        let mut sink = CollectingSink { snapshots: Vec::new() };
        let report = SimulationDriver::new().run(&mut engine, &mut sink).unwrap();
        assert!(report.rounds >= 1);
    }

    #[test]
    fn errors_when_the_round_limit_is_hit() {
        let mut engine = chain_engine();
        let mut sink = CollectingSink { snapshots: Vec::new() };
        let result = SimulationDriver::with_round_limit(1).run(&mut engine, &mut sink);
        assert!(matches!(result, Err(DriverError::RoundLimitExceeded(1))));
    }

    #[test]
    fn json_lines_sink_writes_one_parseable_object_per_round() {
        let mut engine = chain_engine();
        let mut sink = JsonLinesSink::new(Vec::new());
        let report = SimulationDriver::new().run(&mut engine, &mut sink).unwrap();

        let output = String::from_utf8(sink.into_inner()).unwrap();
        let snapshots: Vec<NetworkSnapshot> = output
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(snapshots.len() as u64, report.rounds + 1);

        let last = snapshots.last().unwrap();
        let a_table = &last.tables[0];
        assert_eq!(a_table.node, NodeId::from("A"));
        let a_to_c = a_table
            .routes
            .iter()
            .find(|row| row.destination == NodeId::from("C"))
            .unwrap();
        assert_eq!(a_to_c.cost, Some(2));
    }
}
