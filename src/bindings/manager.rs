//! Binding manager implementation.

use crate::address;
use crate::arbiter;
use crate::connection::ConnectionTracker;
use crate::error::BridgeError;
use crate::host::{rename_effect, RenameEffect, VariableHost, VariableKind};
use crate::topics::TopicStore;
use crate::transport::{Transport, TransportEvent, DEFAULT_PERIOD};
use crate::types::{PerSource, Source, Timestamp, Value, VariableId};
use crossbeam_channel::{never, select, Receiver};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, trace, warn};

/// Bridge configuration.
#[derive(Clone, Debug)]
pub struct BridgeConfig {
    /// Update period requested on every topic subscription.
    pub period: Duration,

    /// Team number to derive the robot transport's initial address from.
    pub initial_team: Option<u16>,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            period: DEFAULT_PERIOD,
            initial_team: None,
        }
    }
}

/// Shared mutable core, guarded by one lock so a value update's fan-out is
/// atomic with respect to concurrent bind/unbind on the same topic.
struct Inner {
    topics: TopicStore,
    connections: ConnectionTracker,
}

/// The subscription/arbitration manager between the variable layer and the
/// two transports.
///
/// Construct exactly one per process and hand references to whoever needs
/// it; there is deliberately no ambient global. Both transports' event
/// channels feed [`handle_event`](Self::handle_event), either directly or
/// through [`pump`](Self::pump).
pub struct BindingManager {
    host: Arc<dyn VariableHost>,
    transports: PerSource<Arc<dyn Transport>>,
    inner: Mutex<Inner>,
}

impl BindingManager {
    /// Create a manager with the default configuration.
    pub fn new(
        host: Arc<dyn VariableHost>,
        sim: Arc<dyn Transport>,
        robot: Arc<dyn Transport>,
    ) -> Self {
        Self::with_config(host, sim, robot, BridgeConfig::default())
    }

    /// Create a manager with explicit configuration.
    pub fn with_config(
        host: Arc<dyn VariableHost>,
        sim: Arc<dyn Transport>,
        robot: Arc<dyn Transport>,
        config: BridgeConfig,
    ) -> Self {
        let transports = PerSource::new(sim, robot);
        let manager = BindingManager {
            host,
            transports: transports.clone(),
            inner: Mutex::new(Inner {
                topics: TopicStore::new(transports, config.period),
                connections: ConnectionTracker::new(),
            }),
        };
        if let Some(team) = config.initial_team {
            manager.set_team(team);
        }
        manager
    }

    // --- Variable layer surface ---

    /// Bind a variable to a topic. Infallible; a topic name nothing
    /// publishes under simply never produces updates.
    pub fn connect_variable(&self, id: VariableId, topic: &str) {
        info!(%id, topic, "binding variable to topic");
        self.inner.lock().topics.bind(id, topic);
    }

    /// Remove a variable's binding, releasing the topic's subscriptions if
    /// it was the last one. Unknown ids are a no-op.
    pub fn disconnect_variable(&self, id: &VariableId) {
        info!(%id, "unbinding variable");
        self.inner.lock().topics.unbind(id);
    }

    /// Write a variable's value back onto the network.
    ///
    /// Deliberately does nothing: publish-back is reserved surface and the
    /// write stays local to the host engine.
    pub fn set_variable(&self, id: &VariableId, value: &Value) {
        trace!(%id, %value, "publish-back not implemented, ignoring write");
    }

    /// Retarget the robot transport at a team's address.
    ///
    /// A team number that derives the currently configured address is a
    /// no-op. Otherwise the address is updated and the session is forced
    /// closed; the transport's own reconnection loop re-establishes it
    /// against the new address.
    pub fn set_team(&self, team: u16) {
        let _guard = self.inner.lock();
        let address = address::team_address(team);
        let robot = &self.transports.robot;
        if robot.server_address() == address {
            return;
        }
        info!(team, %address, "retargeting robot transport");
        robot.set_server_address(&address);
        robot.force_close();
    }

    /// Apply a variable rename.
    ///
    /// Renaming onto a `/`-prefixed name binds the variable to that topic;
    /// renaming away unbinds it; moving between live names rebinds. Only
    /// scalar variables participate.
    pub fn rename_variable(
        &self,
        id: &VariableId,
        kind: VariableKind,
        old_name: &str,
        new_name: &str,
    ) {
        match rename_effect(kind, old_name, new_name) {
            RenameEffect::None => {}
            RenameEffect::Bind => self.connect_variable(id.clone(), new_name),
            RenameEffect::Unbind => self.disconnect_variable(id),
            RenameEffect::Rebind => {
                self.disconnect_variable(id);
                self.connect_variable(id.clone(), new_name);
            }
        }
    }

    // --- Status (read by the display variables) ---

    /// Whether any source is currently connected.
    pub fn is_connected(&self) -> bool {
        self.inner.lock().connections.is_connected()
    }

    /// The source that most recently transitioned into connected.
    pub fn connected_to(&self) -> Option<Source> {
        self.inner.lock().connections.connected_to()
    }

    /// Number of live topic entries.
    pub fn topic_count(&self) -> usize {
        self.inner.lock().topics.topic_count()
    }

    /// Total bindings across all topics.
    pub fn binding_count(&self) -> usize {
        self.inner.lock().topics.binding_count()
    }

    // --- Inbound events ---

    /// Handle one inbound event from a transport.
    ///
    /// Topic events (announce, unannounce, value) pass through source
    /// arbitration; connection events always land in the tracker. The
    /// whole handler runs under the core lock, so a value's fan-out can
    /// never observe a partial bind or unbind.
    pub fn handle_event(&self, source: Source, event: TransportEvent) {
        let mut inner = self.inner.lock();
        match event {
            TransportEvent::Announced { topic } => {
                if arbiter::admits(source, &inner.connections) {
                    // Reserved for announce-driven bookkeeping.
                    trace!(%source, %topic, "topic announced");
                }
            }
            TransportEvent::Unannounced { topic } => {
                if arbiter::admits(source, &inner.connections) {
                    trace!(%source, %topic, "topic unannounced");
                }
            }
            TransportEvent::ValueUpdated {
                topic,
                timestamp,
                value,
            } => {
                if arbiter::admits(source, &inner.connections) {
                    self.deliver(&mut inner, source, &topic, timestamp, value);
                } else {
                    trace!(%source, %topic, "suppressed while sim is connected");
                }
            }
            TransportEvent::ConnectionChanged { connected } => {
                let address = self.transports.get(source).server_address();
                if inner.connections.record(source, connected, address) {
                    info!(%source, connected, "transport connection changed");
                }
            }
        }
    }

    /// Drain both transports' event channels on the calling thread.
    ///
    /// Merges the two receivers while preserving each transport's own
    /// ordering. Returns once both senders have been dropped.
    pub fn pump(&self, sim: Receiver<TransportEvent>, robot: Receiver<TransportEvent>) {
        let mut channels = PerSource::new(Some(sim), Some(robot));
        loop {
            let sim_rx = channels.sim.clone().unwrap_or_else(never);
            let robot_rx = channels.robot.clone().unwrap_or_else(never);
            select! {
                recv(sim_rx) -> event => match event {
                    Ok(event) => self.handle_event(Source::Sim, event),
                    Err(_) => channels.sim = None,
                },
                recv(robot_rx) -> event => match event {
                    Ok(event) => self.handle_event(Source::Robot, event),
                    Err(_) => channels.robot = None,
                },
            }
            if channels.sim.is_none() && channels.robot.is_none() {
                break;
            }
        }
    }

    /// Write an accepted value into every variable bound to the topic.
    ///
    /// An update for a topic whose last binding was just removed is an
    /// expected race, not an error. A single stale binding is removed and
    /// must not abort delivery to the others.
    fn deliver(
        &self,
        inner: &mut Inner,
        source: Source,
        topic: &str,
        timestamp: Timestamp,
        value: Value,
    ) {
        let Some(ids) = inner.topics.bound_variables(topic) else {
            let err = BridgeError::UnknownTopic(topic.to_string());
            debug!(%err, "ignoring update");
            return;
        };
        if !self.host.has_active_target() {
            let err = BridgeError::NoActiveTarget;
            debug!(%err, %topic, "ignoring update");
            return;
        }
        trace!(%source, %topic, ts = timestamp.0, %value, bound = ids.len(), "delivering update");
        for id in ids {
            match self.host.resolve(&id) {
                Some(slot) => slot.assign(value.clone()),
                None => {
                    let err = BridgeError::StaleVariable(id.clone());
                    warn!(%err, %topic, "removing binding");
                    inner.topics.unbind(&id);
                }
            }
        }
    }
}
