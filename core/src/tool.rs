use std::fmt;

use serde::Serialize;

/// The downstream tools the agent knows how to reach.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolKind {
    Echo,
    Add,
    CustomerLookup,
    VehicleInfo,
    Uppercase,
}

impl ToolKind {
    pub const ALL: [ToolKind; 5] = [
        ToolKind::Echo,
        ToolKind::Add,
        ToolKind::CustomerLookup,
        ToolKind::VehicleInfo,
        ToolKind::Uppercase,
    ];

    /// Name reported in `tool_used`.
    pub fn name(self) -> &'static str {
        match self {
            ToolKind::Echo => "echo",
            ToolKind::Add => "add",
            ToolKind::CustomerLookup => "customer_lookup",
            ToolKind::VehicleInfo => "vehicle_info",
            ToolKind::Uppercase => "uppercase",
        }
    }

    /// Path relative to the tool service base URL.
    pub fn path(self) -> &'static str {
        match self {
            ToolKind::Echo => "/echo",
            ToolKind::Add => "/add",
            ToolKind::CustomerLookup => "/customer_lookup",
            ToolKind::VehicleInfo => "/vehicle_info",
            ToolKind::Uppercase => "/uppercase",
        }
    }
}

impl fmt::Display for ToolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A selected tool together with its call parameters.
///
/// Serializes to the exact JSON request body the tool endpoint expects,
/// e.g. `Add { a: 3, b: 5 }` becomes `{"a":3,"b":5}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ToolCall {
    Echo { text: String },
    Add { a: i64, b: i64 },
    CustomerLookup { customer_id: String },
    VehicleInfo { vin: String },
    Uppercase { text: String },
}

impl ToolCall {
    pub fn kind(&self) -> ToolKind {
        match self {
            ToolCall::Echo { .. } => ToolKind::Echo,
            ToolCall::Add { .. } => ToolKind::Add,
            ToolCall::CustomerLookup { .. } => ToolKind::CustomerLookup,
            ToolCall::VehicleInfo { .. } => ToolKind::VehicleInfo,
            ToolCall::Uppercase { .. } => ToolKind::Uppercase,
        }
    }
}
