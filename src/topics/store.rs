//! Topic store implementation.

use crate::transport::{SubscriptionId, Transport};
use crate::types::{PerSource, VariableId};
use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// One live topic: the variables bound to it and the subscription held on
/// each transport. The bound set is never empty while the entry exists.
struct TopicEntry {
    variables: HashSet<VariableId>,
    subscriptions: PerSource<SubscriptionId>,
}

/// Owns the topic → {bound variables, subscriptions} map and the
/// subscription lifecycle on both transports.
///
/// Both transports are always subscribed together, never only one, so an
/// entry holds exactly one handle per transport. The refcount is the bound
/// set's size; adding an id that is already present changes nothing.
pub struct TopicStore {
    transports: PerSource<Arc<dyn Transport>>,
    entries: HashMap<String, TopicEntry>,
    period: Duration,
}

impl TopicStore {
    pub fn new(transports: PerSource<Arc<dyn Transport>>, period: Duration) -> Self {
        Self {
            transports,
            entries: HashMap::new(),
            period,
        }
    }

    /// Bind a variable to a topic.
    ///
    /// Creates the entry and subscribes on both transports if this is the
    /// topic's first binding; otherwise joins the existing entry. Adding an
    /// id already present is a no-op. Topic names are accepted as opaque
    /// strings; this never fails.
    pub fn bind(&mut self, id: VariableId, topic: &str) {
        let entry = match self.entries.entry(topic.to_string()) {
            Entry::Occupied(occupied) => occupied.into_mut(),
            Entry::Vacant(vacant) => {
                let topics = [topic.to_string()];
                let subscriptions = PerSource::new(
                    self.transports.sim.subscribe(&topics, self.period),
                    self.transports.robot.subscribe(&topics, self.period),
                );
                debug!(topic, "subscribed on both transports");
                vacant.insert(TopicEntry {
                    variables: HashSet::new(),
                    subscriptions,
                })
            }
        };
        entry.variables.insert(id);
    }

    /// Remove a variable from every entry that holds it.
    ///
    /// When an entry's bound set empties, both transports' subscriptions
    /// are released and the entry is deleted. An id bound to nothing is a
    /// no-op, not an error.
    pub fn unbind(&mut self, id: &VariableId) {
        let mut emptied = Vec::new();
        for (topic, entry) in &mut self.entries {
            if entry.variables.remove(id) && entry.variables.is_empty() {
                emptied.push(topic.clone());
            }
        }
        for topic in emptied {
            if let Some(entry) = self.entries.remove(&topic) {
                for (source, subscription) in entry.subscriptions.iter() {
                    self.transports.get(source).unsubscribe(*subscription);
                }
                debug!(%topic, "last binding removed, unsubscribed on both transports");
            }
        }
    }

    /// Whether a topic currently has an entry.
    pub fn contains(&self, topic: &str) -> bool {
        self.entries.contains_key(topic)
    }

    /// Snapshot of the ids bound to a topic, or `None` if it has no entry.
    pub fn bound_variables(&self, topic: &str) -> Option<Vec<VariableId>> {
        self.entries
            .get(topic)
            .map(|entry| entry.variables.iter().cloned().collect())
    }

    /// Number of live topic entries.
    pub fn topic_count(&self) -> usize {
        self.entries.len()
    }

    /// Total number of bindings across all entries.
    pub fn binding_count(&self) -> usize {
        self.entries.values().map(|e| e.variables.len()).sum()
    }
}
