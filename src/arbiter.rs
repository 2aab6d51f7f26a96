//! Source arbitration between the simulator and the robot.
//!
//! The simulator is authoritative whenever its session is active: a robot
//! powered on the same network must not corrupt a bench-testing session.
//! Presence of a simulator is inferred from its connection, so switching
//! between bench and field needs no manual toggle.

use crate::connection::ConnectionTracker;
use crate::types::Source;

/// Whether an inbound topic event from `source` may act on shared state.
///
/// Robot events are inadmissible while sim's connection is active; sim
/// events always pass. Evaluated against the tracker at the instant the
/// event is handled, never cached: sim connectivity can change between
/// events. The suppression is global across all topics, not limited to
/// topics sim also publishes.
pub fn admits(source: Source, connections: &ConnectionTracker) -> bool {
    !(source == Source::Robot && connections.source_connected(Source::Sim))
}
