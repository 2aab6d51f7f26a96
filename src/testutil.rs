//! In-memory doubles for unit tests.

use crate::host::{VariableHost, VariableSlot};
use crate::transport::{SubscriptionId, Transport};
use crate::types::{Value, VariableId};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Transport double that records every call it receives.
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
        let transport = RecordingTransport {
            address: Mutex::new(address.to_string()),
            ..Default::default()
        };
        Arc::new(transport)
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

/// A variable cell that remembers the last value assigned to it.
#[derive(Default)]
pub struct MemorySlot {
    pub value: Mutex<Option<Value>>,
}

impl VariableSlot for MemorySlot {
    fn assign(&self, value: Value) {
        *self.value.lock() = Some(value);
    }
}

/// Host double backed by a plain map of live variables.
#[derive(Default)]
pub struct MemoryHost {
    pub active: Mutex<bool>,
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
