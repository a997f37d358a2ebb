use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use relay_core::Settings;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::info;

use crate::api::{AgentRequest, AgentResponse, HealthResponse};
use crate::error::{handle_panic, AppError};
use crate::AppState;

/// Full application: routes, optional tool service, and middleware.
pub fn build_router(state: AppState) -> Router {
    let mut router = Router::new()
        .route("/health", get(health_check))
        .nest("/agent", agent_routes());

    if state.settings.serve_tools {
        router = router.nest("/tools", relay_tools::router());
    }

    let settings = state.settings.clone();
    with_layers(router.with_state(state), &settings)
}

fn agent_routes() -> Router<AppState> {
    Router::new().route("/run", post(run_agent))
}

/// Middleware, innermost first: panic catcher, request timeout, tracing, CORS.
pub fn with_layers(router: Router, settings: &Settings) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    router
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TimeoutLayer::new(settings.request_timeout))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

// --- HANDLERS ---

async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    info!("Health check endpoint called");
    Json(HealthResponse {
        status: "ok",
        app: state.settings.app_name.clone(),
    })
}

async fn run_agent(
    State(state): State<AppState>,
    Json(payload): Json<AgentRequest>,
) -> Result<Json<AgentResponse>, AppError> {
    let response = state.agent.run(payload).await?;
    info!(
        tool = response.tool_used.as_deref().unwrap_or("none"),
        status = %response.status,
        "Agent run finished"
    );
    Ok(Json(response))
}
