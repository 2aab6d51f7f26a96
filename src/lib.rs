//! # televar
//!
//! Bridges named variables in a host visual-programming environment to live
//! values on a real-time key/value telemetry network used for robot control
//! and simulation. Renaming a variable with a `/`-prefixed name makes it
//! live: its value mirrors the matching network topic, sourced from a
//! physical robot or a simulator, whichever is reachable.
//!
//! ## Core Concepts
//!
//! - **Topics**: named keys on the telemetry network
//! - **Bindings**: variable id → topic associations, multiplexed onto one
//!   subscription per topic per transport
//! - **Sources**: two redundant origins (`sim`, `robot`); the simulator is
//!   authoritative whenever it is connected
//! - **Transports**: external wire-protocol sessions, consumed through the
//!   [`transport::Transport`] trait and per-transport event channels
//!
//! ## Example
//!
//! ```ignore
//! use televar::{BindingManager, Source, transport::event_channel};
//!
//! let (sim_tx, sim_rx) = event_channel();
//! let (robot_tx, robot_rx) = event_channel();
//!
//! let manager = Arc::new(BindingManager::new(host, sim, robot));
//! manager.set_team(4096);
//! manager.connect_variable("var-1".into(), "/arm/angle");
//!
//! let pump = Arc::clone(&manager);
//! thread::spawn(move || pump.pump(sim_rx, robot_rx));
//! ```

pub mod address;
pub mod arbiter;
pub mod bindings;
pub mod connection;
pub mod error;
pub mod host;
pub mod topics;
pub mod transport;
pub mod types;

#[cfg(test)]
pub(crate) mod testutil;

// Re-exports
pub use bindings::{BindingManager, BridgeConfig};
pub use connection::{ConnectionState, ConnectionTracker};
pub use error::{BridgeError, Result};
pub use host::{
    is_live_name, rename_effect, RenameEffect, SpecialVariable, VariableHost, VariableKind,
    VariableSlot,
};
pub use topics::TopicStore;
pub use transport::{SubscriptionId, Transport, TransportEvent, DEFAULT_PERIOD};
pub use types::*;
