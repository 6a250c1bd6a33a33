/*!
Distance Vector routing: the engine itself, the dense per-node routing
tables it maintains, and the serializable per-round snapshots handed to
external consumers.

Re-exports the engine types for easy consumption by callers.
*/

pub mod engine;
pub mod snapshot;
pub mod table;

pub use engine::{DistanceVectorEngine, EngineError, EngineState, Route};
pub use snapshot::{NetworkSnapshot, RouteRow, TableSnapshot};
pub use table::{RouteEntry, RoutingTable};
