//! Rule-based agent core: settings, dispatch rules, and the outbound tool client.

pub mod agent;
pub mod client;
pub mod config;
pub mod rules;
pub mod tool;

pub use agent::{Agent, AgentError, AgentRequest, AgentResponse};
pub use client::{ToolClient, ToolError};
pub use config::{ConfigError, Settings};
pub use rules::{Decision, RuleError, RuleSet};
pub use tool::{ToolCall, ToolKind};
