//! Refcounted mapping from topic names to bound variables and live
//! subscriptions.
//!
//! Many script variables may reference the same telemetry key, while
//! subscriptions are comparatively expensive (network round trips,
//! server-side bookkeeping). The store multiplexes all bindings for one
//! topic onto a single subscription per transport, and releases both
//! subscriptions the instant the last binding goes away.

mod store;

pub use store::TopicStore;
