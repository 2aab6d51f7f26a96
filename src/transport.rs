//! Transport seam: the capability this crate consumes from the wire layer.
//!
//! The bridge never opens sockets itself. Each source (`sim`, `robot`) is
//! backed by one [`Transport`], which owns connection establishment, framing
//! and the reconnection loop. Outbound calls (`subscribe`, `unsubscribe`,
//! `publish`, `force_close`) are fire-and-forget requests; inbound traffic
//! arrives as [`TransportEvent`] values on one ordered channel per transport.

use crate::types::{Timestamp, Value};
use crossbeam_channel::{unbounded, Receiver, Sender};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Default subscription update period (the wire layer polls at 10 Hz).
pub const DEFAULT_PERIOD: Duration = Duration::from_millis(100);

/// Opaque token returned by a transport on subscribe, required to
/// unsubscribe later.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubscriptionId(pub u64);

impl fmt::Debug for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SubscriptionId({})", self.0)
    }
}

/// Publish/subscribe capability of one network session.
///
/// No method blocks or suspends on I/O; completion and retry are the
/// transport's concern. `force_close` unconditionally tears the session
/// down; the transport's own reconnection loop brings it back up against
/// the currently configured address.
pub trait Transport: Send + Sync {
    /// Request periodic updates for a set of topics. Never fails; an
    /// unreachable server simply produces no events until it reconnects.
    fn subscribe(&self, topics: &[String], period: Duration) -> SubscriptionId;

    /// Release a subscription previously returned by `subscribe`.
    fn unsubscribe(&self, subscription: SubscriptionId);

    /// Publish a value under a topic. Reserved; nothing in the bridge calls
    /// this yet.
    fn publish(&self, topic: &str, value: &Value);

    /// The server address this transport is currently configured against.
    fn server_address(&self) -> String;

    /// Retarget the transport. Takes effect on the next (re)connect.
    fn set_server_address(&self, address: &str);

    /// Tear down the current session without waiting for acknowledgment.
    fn force_close(&self);
}

/// Inbound events a transport delivers, in per-transport order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TransportEvent {
    /// The server announced a topic.
    Announced { topic: String },

    /// The server retracted a topic.
    Unannounced { topic: String },

    /// A new value was published under a topic.
    ValueUpdated {
        topic: String,
        timestamp: Timestamp,
        value: Value,
    },

    /// The session transitioned into or out of connected.
    ConnectionChanged { connected: bool },
}

/// Create the event channel for one transport.
///
/// The transport keeps the sender and the bridge consumes the receiver;
/// per-transport ordering is whatever order the sender observes.
pub fn event_channel() -> (Sender<TransportEvent>, Receiver<TransportEvent>) {
    unbounded()
}
