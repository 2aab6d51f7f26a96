//! Binding management: the public surface consumed by the variable layer.
//!
//! A [`BindingManager`] is the process's single shared view of all
//! telemetry bindings. It multiplexes variable bindings onto topic
//! subscriptions, arbitrates between the two sources, and routes accepted
//! value updates into the host engine's variables.
//!
//! # Example
//!
//! ```ignore
//! let manager = Arc::new(BindingManager::new(host, sim_transport, robot_transport));
//!
//! manager.connect_variable("var-1".into(), "/arm/angle");
//! manager.set_team(4096);
//!
//! // Drain both transports' event channels on a dedicated thread.
//! let pump = Arc::clone(&manager);
//! thread::spawn(move || pump.pump(sim_events, robot_events));
//! ```

mod manager;

pub use manager::{BindingManager, BridgeConfig};
