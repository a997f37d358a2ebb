use serde::Serialize;

// Re-exported so handlers only import from here
pub use relay_core::{AgentRequest, AgentResponse};

// Output: liveness plus which app is answering
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub app: String,
}

// Output: the only error body callers ever see
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: &'static str,
    pub message: &'static str,
}

impl ErrorBody {
    pub const INTERNAL: ErrorBody = ErrorBody {
        error: "Internal Server Error",
        message: "Something went wrong. Please contact support.",
    };
}
