//! Host-engine seam: variable lookup, well-known names, and the rename
//! policy that makes a variable live.
//!
//! The variable storage object itself stays in the host engine. What lives
//! here is the policy around it: which names are live topics, which names
//! are intercepted for status/configuration, and what a rename means for
//! the variable's binding.

use crate::error::{BridgeError, Result};
use crate::types::{Value, VariableId};
use std::sync::Arc;

/// A live variable cell the bridge can write telemetry values into.
pub trait VariableSlot: Send + Sync {
    fn assign(&self, value: Value);
}

/// Variable lookup capability, scoped to the currently active execution
/// target.
pub trait VariableHost: Send + Sync {
    /// Whether any execution target is active. When false, inbound value
    /// updates are discarded wholesale.
    fn has_active_target(&self) -> bool;

    /// Resolve an id to a live variable. `None` means the variable was
    /// deleted; the bridge reacts by unbinding that id.
    fn resolve(&self, id: &VariableId) -> Option<Arc<dyn VariableSlot>>;
}

/// Variable names beginning with `/` are live: their value mirrors the
/// telemetry topic of the same name.
pub fn is_live_name(name: &str) -> bool {
    name.starts_with('/')
}

/// Well-known variable names with intercepted reads or writes, resolved by
/// structure once instead of string comparison scattered through the
/// read/write path.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpecialVariable {
    /// Writes reconfigure the robot transport's target address.
    TeamNumber,
    /// Reads report whether any source is connected.
    IsConnected,
    /// Reads report the most recently connected source.
    ConnectedTo,
}

impl SpecialVariable {
    pub const TEAM_NUMBER: &'static str = "team number";
    pub const IS_CONNECTED: &'static str = "is connected";
    pub const CONNECTED_TO: &'static str = "connected to";

    pub fn from_name(name: &str) -> Option<Self> {
        if name == Self::TEAM_NUMBER {
            Some(SpecialVariable::TeamNumber)
        } else if name == Self::IS_CONNECTED {
            Some(SpecialVariable::IsConnected)
        } else if name == Self::CONNECTED_TO {
            Some(SpecialVariable::ConnectedTo)
        } else {
            None
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            SpecialVariable::TeamNumber => Self::TEAM_NUMBER,
            SpecialVariable::IsConnected => Self::IS_CONNECTED,
            SpecialVariable::ConnectedTo => Self::CONNECTED_TO,
        }
    }
}

/// Kind of a host-engine variable. Only scalars can be bound to topics.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VariableKind {
    Scalar,
    List,
    Broadcast,
}

impl VariableKind {
    /// Parse the host engine's kind tag. Scalars are tagged with the empty
    /// string for compatibility with the block editor.
    pub fn parse(tag: &str) -> Result<Self> {
        match tag {
            "" => Ok(VariableKind::Scalar),
            "list" => Ok(VariableKind::List),
            "broadcast_msg" => Ok(VariableKind::Broadcast),
            other => Err(BridgeError::InvalidVariableType(other.to_string())),
        }
    }

    pub fn bindable(self) -> bool {
        matches!(self, VariableKind::Scalar)
    }
}

/// What a rename means for a variable's binding.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RenameEffect {
    /// No binding change.
    None,
    /// The variable became live: bind to the new name.
    Bind,
    /// The variable stopped being live: unbind.
    Unbind,
    /// The variable moved between live names: unbind, then bind to the new
    /// name.
    Rebind,
}

/// Classify a rename. Only scalar variables participate; everything else
/// stays unbound regardless of name.
pub fn rename_effect(kind: VariableKind, old_name: &str, new_name: &str) -> RenameEffect {
    if !kind.bindable() || old_name == new_name {
        return RenameEffect::None;
    }
    match (is_live_name(old_name), is_live_name(new_name)) {
        (false, true) => RenameEffect::Bind,
        (true, false) => RenameEffect::Unbind,
        (true, true) => RenameEffect::Rebind,
        (false, false) => RenameEffect::None,
    }
}
