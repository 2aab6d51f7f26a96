//! Shared fixtures: a transport double that records every call, and an
//! in-memory variable host.

// Each test binary compiles this module separately and uses a different
// slice of it.
#![allow(dead_code)]

use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Once;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use televar::{SubscriptionId, Transport, Value, VariableHost, VariableId, VariableSlot};

/// Install a subscriber once so `--nocapture` runs show bridge logs.
pub fn init_tracing() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    });
}

#[derive(Default)]
pub struct RecordingTransport {
    next_id: AtomicU64,
    pub subscribes: Mutex<Vec<(Vec<String>, SubscriptionId)>>,
    pub unsubscribes: Mutex<Vec<SubscriptionId>>,
    pub address: Mutex<String>,
    pub closes: AtomicU64,
}

impl RecordingTransport {
    pub fn new(address: &str) -> Arc<Self> {
        Arc::new(RecordingTransport {
            address: Mutex::new(address.to_string()),
            ..Default::default()
        })
    }

    pub fn subscribe_count(&self) -> usize {
        self.subscribes.lock().len()
    }

    pub fn unsubscribe_count(&self) -> usize {
        self.unsubscribes.lock().len()
    }

    pub fn close_count(&self) -> u64 {
        self.closes.load(Ordering::SeqCst)
    }
}

impl Transport for RecordingTransport {
    fn subscribe(&self, topics: &[String], _period: Duration) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::SeqCst));
        self.subscribes.lock().push((topics.to_vec(), id));
        id
    }

    fn unsubscribe(&self, subscription: SubscriptionId) {
        self.unsubscribes.lock().push(subscription);
    }

    fn publish(&self, _topic: &str, _value: &Value) {}

    fn server_address(&self) -> String {
        self.address.lock().clone()
    }

    fn set_server_address(&self, address: &str) {
        *self.address.lock() = address.to_string();
    }

    fn force_close(&self) {
        self.closes.fetch_add(1, Ordering::SeqCst);
    }
}

#[derive(Default)]
pub struct MemorySlot {
    pub value: Mutex<Option<Value>>,
}

impl MemorySlot {
    pub fn get(&self) -> Option<Value> {
        self.value.lock().clone()
    }
}

impl VariableSlot for MemorySlot {
    fn assign(&self, value: Value) {
        *self.value.lock() = Some(value);
    }
}

#[derive(Default)]
pub struct MemoryHost {
    active: Mutex<bool>,
    slots: Mutex<HashMap<VariableId, Arc<MemorySlot>>>,
}

impl MemoryHost {
    pub fn new() -> Arc<Self> {
        Arc::new(MemoryHost {
            active: Mutex::new(true),
            ..Default::default()
        })
    }

    pub fn insert(&self, id: impl Into<VariableId>) -> Arc<MemorySlot> {
        let slot = Arc::new(MemorySlot::default());
        self.slots.lock().insert(id.into(), Arc::clone(&slot));
        slot
    }

    pub fn remove(&self, id: &VariableId) {
        self.slots.lock().remove(id);
    }

    pub fn set_active(&self, active: bool) {
        *self.active.lock() = active;
    }
}

impl VariableHost for MemoryHost {
    fn has_active_target(&self) -> bool {
        *self.active.lock()
    }

    fn resolve(&self, id: &VariableId) -> Option<Arc<dyn VariableSlot>> {
        self.slots
            .lock()
            .get(id)
            .cloned()
            .map(|slot| slot as Arc<dyn VariableSlot>)
    }
}
