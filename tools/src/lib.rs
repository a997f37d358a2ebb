//! Reference implementation of the downstream tool service.
//!
//! Five POST endpoints, each answering with a JSON object that carries a
//! `status` field. Mount the router under `/tools` to match the agent's
//! default base URL.

mod directory;

use axum::{routing::post, Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;

use crate::directory::{find_customer, find_vehicle};

#[derive(Debug, Deserialize)]
pub struct TextInput {
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct AddInput {
    pub a: i64,
    pub b: i64,
}

#[derive(Debug, Deserialize)]
pub struct CustomerInput {
    pub customer_id: String,
}

#[derive(Debug, Deserialize)]
pub struct VehicleInput {
    pub vin: String,
}

/// Router with all tool endpoints at its root.
pub fn router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/echo", post(echo))
        .route("/add", post(add))
        .route("/customer_lookup", post(customer_lookup))
        .route("/vehicle_info", post(vehicle_info))
        .route("/uppercase", post(uppercase))
}

async fn echo(Json(input): Json<TextInput>) -> Json<Value> {
    info!("Tool echo called");
    Json(json!({ "status": "success", "tool": "echo", "text": input.text }))
}

async fn add(Json(input): Json<AddInput>) -> Json<Value> {
    info!(a = input.a, b = input.b, "Tool add called");
    match input.a.checked_add(input.b) {
        Some(sum) => Json(json!({
            "status": "success",
            "tool": "add",
            "a": input.a,
            "b": input.b,
            "sum": sum,
        })),
        None => Json(json!({
            "status": "failed",
            "tool": "add",
            "message": "integer overflow",
        })),
    }
}

async fn customer_lookup(Json(input): Json<CustomerInput>) -> Json<Value> {
    info!(customer_id = %input.customer_id, "Tool customer_lookup called");
    match find_customer(&input.customer_id) {
        Some(customer) => Json(json!({
            "status": "success",
            "tool": "customer_lookup",
            "customer": customer,
        })),
        None => Json(json!({
            "status": "not_found",
            "tool": "customer_lookup",
            "customer_id": input.customer_id,
        })),
    }
}

async fn vehicle_info(Json(input): Json<VehicleInput>) -> Json<Value> {
    info!(vin = %input.vin, "Tool vehicle_info called");
    match find_vehicle(&input.vin) {
        Some(vehicle) => Json(json!({
            "status": "success",
            "tool": "vehicle_info",
            "vehicle": vehicle,
        })),
        None => Json(json!({
            "status": "not_found",
            "tool": "vehicle_info",
            "vin": input.vin,
        })),
    }
}

async fn uppercase(Json(input): Json<TextInput>) -> Json<Value> {
    info!("Tool uppercase called");
    Json(json!({
        "status": "success",
        "tool": "uppercase",
        "text": input.text.to_uppercase(),
    }))
}
