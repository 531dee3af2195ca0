use axum::{extract::State, routing::get, Json, Router};
use serde_json::{json, Value};

use crate::state::SharedState;

pub fn health_routes() -> Router<SharedState> {
    Router::new().route("/health", get(health))
}

async fn health(State(state): State<SharedState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "database": state.db.is_healthy(),
    }))
}
