//! Connection tracking for the two transports.

use crate::types::{PerSource, Source};

/// Live state of one transport's connection.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ConnectionState {
    /// Whether the session is currently established.
    pub connected: bool,
    /// Address of the server at the last transition.
    pub last_address: Option<String>,
}

/// Tracks which source is currently connected.
///
/// Mutated only from transport connection events; read by the arbiter on
/// every inbound topic event and by the status getters backing the display
/// variables. `connected_to` is sticky: it names the source that most
/// recently transitioned into connected, even after that session drops.
#[derive(Clone, Debug, Default)]
pub struct ConnectionTracker {
    states: PerSource<ConnectionState>,
    last_connected: Option<Source>,
}

impl ConnectionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a connection transition. Idempotent: re-announcing the state
    /// a source is already in changes nothing and returns `false`.
    pub fn record(&mut self, source: Source, connected: bool, address: String) -> bool {
        let state = self.states.get_mut(source);
        if state.connected == connected {
            return false;
        }
        state.connected = connected;
        state.last_address = Some(address);
        if connected {
            self.last_connected = Some(source);
        }
        true
    }

    /// Whether this source's session is currently established.
    pub fn source_connected(&self, source: Source) -> bool {
        self.states.get(source).connected
    }

    /// Whether any source is currently connected.
    pub fn is_connected(&self) -> bool {
        self.states.iter().any(|(_, s)| s.connected)
    }

    /// The source that most recently transitioned into connected.
    pub fn connected_to(&self) -> Option<Source> {
        self.last_connected
    }

    pub fn state(&self, source: Source) -> &ConnectionState {
        self.states.get(source)
    }
}
