//! Core types for the telemetry bridge.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

/// Identifier of a host-engine variable.
///
/// Opaque to this crate; the host engine assigns them and they only serve
/// as keys into the binding tables.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VariableId(pub String);

impl VariableId {
    pub fn new(id: impl Into<String>) -> Self {
        VariableId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for VariableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "VariableId({})", self.0)
    }
}

impl fmt::Display for VariableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for VariableId {
    fn from(s: &str) -> Self {
        VariableId(s.to_string())
    }
}

/// One of the two redundant origins of topic data.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Source {
    /// Local simulator session.
    Sim,
    /// Physical robot session.
    Robot,
}

impl Source {
    /// The opposite source.
    pub fn other(self) -> Self {
        match self {
            Source::Sim => Source::Robot,
            Source::Robot => Source::Sim,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Source::Sim => "sim",
            Source::Robot => "robot",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A pair of values addressed by [`Source`].
///
/// Used wherever the bridge keeps one item per transport: the transports
/// themselves, subscription handles, connection states.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PerSource<T> {
    pub sim: T,
    pub robot: T,
}

impl<T> PerSource<T> {
    pub fn new(sim: T, robot: T) -> Self {
        PerSource { sim, robot }
    }

    pub fn get(&self, source: Source) -> &T {
        match source {
            Source::Sim => &self.sim,
            Source::Robot => &self.robot,
        }
    }

    pub fn get_mut(&mut self, source: Source) -> &mut T {
        match source {
            Source::Sim => &mut self.sim,
            Source::Robot => &mut self.robot,
        }
    }

    /// Iterate both halves in a fixed order (sim first).
    pub fn iter(&self) -> impl Iterator<Item = (Source, &T)> {
        [(Source::Sim, &self.sim), (Source::Robot, &self.robot)].into_iter()
    }
}

/// Microseconds since Unix epoch, as stamped on value updates.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct Timestamp(pub i64);

impl Timestamp {
    /// Current time.
    pub fn now() -> Self {
        let duration = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("Time went backwards");
        Timestamp(duration.as_micros() as i64)
    }
}

impl fmt::Debug for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Timestamp({})", self.0)
    }
}

/// A telemetry value as published under a topic.
///
/// Untagged so values round-trip through plain JSON at the transport seam:
/// `true`, `42`, `1.5`, `"auto"`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Double(f64),
    Text(String),
}

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Double(_) => "double",
            Value::Text(_) => "text",
        }
    }

    /// Convert from a JSON value as decoded off the wire.
    ///
    /// Numbers without a fractional part map to `Int`; anything non-scalar
    /// is rejected.
    pub fn from_json(json: &serde_json::Value) -> Option<Self> {
        match json {
            serde_json::Value::Bool(b) => Some(Value::Bool(*b)),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Some(Value::Int(i))
                } else {
                    n.as_f64().map(Value::Double)
                }
            }
            serde_json::Value::String(s) => Some(Value::Text(s.clone())),
            _ => None,
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Bool(b) => serde_json::Value::from(*b),
            Value::Int(i) => serde_json::Value::from(*i),
            Value::Double(d) => serde_json::Value::from(*d),
            Value::Text(s) => serde_json::Value::from(s.as_str()),
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Double(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(i) => write!(f, "{}", i),
            Value::Double(d) => write!(f, "{}", d),
            Value::Text(s) => f.write_str(s),
        }
    }
}
