use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use thiserror::Error;
use tracing::{info, warn};

use crate::client::{ToolClient, ToolError};
use crate::rules::{Decision, RuleError, RuleSet};
use crate::tool::ToolKind;

pub const AGENT_TYPE: &str = "rule_based";
pub const EMPTY_INPUT_MESSAGE: &str = "Please enter some text";

// Input: free text from the caller. Missing and null both mean "".
#[derive(Debug, Default, Deserialize)]
pub struct AgentRequest {
    #[serde(default)]
    pub text: Option<String>,
}

// Output: the envelope returned no matter which tool ran
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentResponse {
    pub query: String,
    pub agent_type: String,
    pub tool_used: Option<String>,
    pub status: String,
    pub result: Option<Value>,
}

impl AgentResponse {
    /// Agent-level failure for blank input. Not an error.
    pub fn empty_input() -> Self {
        Self {
            query: String::new(),
            agent_type: AGENT_TYPE.to_string(),
            tool_used: None,
            status: "failed".to_string(),
            result: Some(json!({ "message": EMPTY_INPUT_MESSAGE })),
        }
    }

    /// Wraps a tool's reply. `status` is lifted from the reply itself.
    pub fn from_tool(query: &str, tool: ToolKind, reply: Value) -> Result<Self, ToolError> {
        let status = reply
            .get("status")
            .and_then(Value::as_str)
            .ok_or(ToolError::MissingStatus { tool })?
            .to_string();

        Ok(Self {
            query: query.to_string(),
            agent_type: AGENT_TYPE.to_string(),
            tool_used: Some(tool.name().to_string()),
            status,
            result: Some(reply),
        })
    }
}

/// Everything that can stop an agent run short of an envelope.
#[derive(Debug, Error)]
pub enum AgentError {
    #[error(transparent)]
    Rule(#[from] RuleError),

    #[error(transparent)]
    Tool(#[from] ToolError),
}

/// The rule-based agent: classify, call one tool, wrap the reply.
pub struct Agent {
    rules: RuleSet,
    client: ToolClient,
}

impl Agent {
    pub fn new(client: ToolClient) -> Result<Self, AgentError> {
        Ok(Self {
            rules: RuleSet::new()?,
            client,
        })
    }

    pub async fn run(&self, request: AgentRequest) -> Result<AgentResponse, AgentError> {
        let query = request.text.as_deref().unwrap_or("").trim();

        let decision = self.rules.classify(query).inspect_err(|e| {
            warn!("Input could not be dispatched: {}", e);
        })?;

        let call = match decision {
            Decision::Empty => {
                info!("Agent received empty input");
                return Ok(AgentResponse::empty_input());
            }
            Decision::Call(call) => call,
        };

        let tool = call.kind();
        info!(%tool, "Agent dispatching");

        let reply = self.client.call(&call).await.inspect_err(|e| {
            warn!(%tool, kind = e.kind(), "Tool call failed: {}", e);
        })?;

        Ok(AgentResponse::from_tool(query, tool, reply)?)
    }
}
