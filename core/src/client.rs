use std::time::Duration;

use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::tool::{ToolCall, ToolKind};

/// Failures of a single outbound tool call.
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("tool '{tool}' did not respond within {timeout:?}")]
    Timeout { tool: ToolKind, timeout: Duration },

    #[error("tool '{tool}' is unreachable: {source}")]
    Transport {
        tool: ToolKind,
        #[source]
        source: reqwest::Error,
    },

    #[error("tool '{tool}' answered with HTTP {status}")]
    Status {
        tool: ToolKind,
        status: reqwest::StatusCode,
    },

    #[error("tool '{tool}' returned a body that is not a JSON object: {reason}")]
    MalformedBody { tool: ToolKind, reason: String },

    #[error("tool '{tool}' response has no string 'status' field")]
    MissingStatus { tool: ToolKind },

    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

impl ToolError {
    /// Short machine-readable label for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            ToolError::Timeout { .. } => "timeout",
            ToolError::Transport { .. } => "transport",
            ToolError::Status { .. } => "status",
            ToolError::MalformedBody { .. } => "malformed_body",
            ToolError::MissingStatus { .. } => "missing_status",
            ToolError::Client(_) => "client",
        }
    }
}

// Pooled HTTP client for the downstream tool service. Cheap to clone.
#[derive(Clone)]
pub struct ToolClient {
    http: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl ToolClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ToolError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ToolError::Client)?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url_for(&self, tool: ToolKind) -> String {
        format!("{}{}", self.base_url, tool.path())
    }

    /// POSTs the call's body to its tool endpoint and returns the JSON object verbatim.
    pub async fn call(&self, call: &ToolCall) -> Result<Value, ToolError> {
        let tool = call.kind();
        let url = self.url_for(tool);
        debug!(%tool, %url, "calling tool");

        // A. Send
        let response = self
            .http
            .post(&url)
            .json(call)
            .send()
            .await
            .map_err(|e| self.classify(tool, e))?;

        // B. Status check
        let status = response.status();
        if !status.is_success() {
            return Err(ToolError::Status { tool, status });
        }

        // C. Decode. Anything but a JSON object is rejected here.
        let bytes = response.bytes().await.map_err(|e| self.classify(tool, e))?;
        let body: Value = serde_json::from_slice(&bytes).map_err(|e| ToolError::MalformedBody {
            tool,
            reason: e.to_string(),
        })?;

        if !body.is_object() {
            return Err(ToolError::MalformedBody {
                tool,
                reason: format!("expected an object, got {}", json_type(&body)),
            });
        }

        Ok(body)
    }

    fn classify(&self, tool: ToolKind, err: reqwest::Error) -> ToolError {
        if err.is_timeout() {
            ToolError::Timeout {
                tool,
                timeout: self.timeout,
            }
        } else {
            ToolError::Transport { tool, source: err }
        }
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use axum::{extract::Path, http::StatusCode, routing::post, Json, Router};
    use serde_json::json;
    use std::net::SocketAddr;
    use tokio::net::TcpListener;

    /// Stub tool service: each endpoint echoes back the path and the body it received.
    pub(crate) async fn spawn_stub() -> SocketAddr {
        let app = Router::new().route(
            "/tools/{tool}",
            post(|Path(tool): Path<String>, Json(body): Json<Value>| async move {
                Json(json!({"status": "success", "tool": tool, "received": body}))
            }),
        );
        spawn(app).await
    }

    pub(crate) async fn spawn(app: Router) -> SocketAddr {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        addr
    }

    fn client_for(addr: SocketAddr) -> ToolClient {
        ToolClient::new(format!("http://{addr}/tools/"), Duration::from_secs(2)).unwrap()
    }

    #[test]
    fn trailing_slash_is_normalised() {
        let client = ToolClient::new("http://localhost:8000/tools/", Duration::from_secs(1)).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8000/tools");
        assert_eq!(
            client.url_for(ToolKind::CustomerLookup),
            "http://localhost:8000/tools/customer_lookup"
        );
    }

    #[tokio::test]
    async fn posts_body_to_tool_path() {
        let client = client_for(spawn_stub().await);

        let body = client.call(&ToolCall::Add { a: 3, b: 5 }).await.unwrap();

        assert_eq!(body["tool"], "add");
        assert_eq!(body["received"], json!({"a": 3, "b": 5}));
    }

    #[tokio::test]
    async fn non_success_status_is_an_error() {
        let app = Router::new().route(
            "/tools/echo",
            post(|| async { (StatusCode::SERVICE_UNAVAILABLE, Json(json!({"status": "down"}))) }),
        );
        let client = client_for(spawn(app).await);

        let err = client.call(&ToolCall::Echo { text: "x".into() }).await.unwrap_err();
        assert!(matches!(err, ToolError::Status { status, .. } if status == StatusCode::SERVICE_UNAVAILABLE));
    }

    #[tokio::test]
    async fn non_object_body_is_malformed() {
        let app = Router::new()
            .route("/tools/echo", post(|| async { Json(json!(["not", "an", "object"])) }))
            .route("/tools/uppercase", post(|| async { "plain text" }));
        let client = client_for(spawn(app).await);

        let err = client.call(&ToolCall::Echo { text: "x".into() }).await.unwrap_err();
        assert_eq!(err.kind(), "malformed_body");

        let err = client.call(&ToolCall::Uppercase { text: "x".into() }).await.unwrap_err();
        assert_eq!(err.kind(), "malformed_body");
    }

    #[tokio::test]
    async fn unreachable_service_is_transport_error() {
        // Bind then drop to get a port with nothing listening.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = client_for(addr)
            .call(&ToolCall::VehicleInfo { vin: "VIN1".into() })
            .await
            .unwrap_err();
        assert_eq!(err.kind(), "transport");
    }

    #[tokio::test]
    async fn slow_service_times_out() {
        let app = Router::new().route(
            "/tools/echo",
            post(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Json(json!({"status": "late"}))
            }),
        );
        let addr = spawn(app).await;
        let client = ToolClient::new(format!("http://{addr}/tools"), Duration::from_millis(200)).unwrap();

        let err = client.call(&ToolCall::Echo { text: "x".into() }).await.unwrap_err();
        assert_eq!(err.kind(), "timeout");
    }
}
