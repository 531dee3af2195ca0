use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};

use super::error::ApiError;
use crate::models::subject::{ExplanationBody, ExplanationResponse};
use crate::state::SharedState;

pub fn cache_routes() -> Router<SharedState> {
    Router::new().route(
        "/api/cache/explanation/:subcategory",
        get(get_explanation).post(put_explanation),
    )
}

async fn get_explanation(
    State(state): State<SharedState>,
    Path(subcategory): Path<String>,
) -> Json<ExplanationResponse> {
    Json(ExplanationResponse {
        explanation: state.explanation_cache.get(&subcategory).await,
    })
}

async fn put_explanation(
    State(state): State<SharedState>,
    Path(subcategory): Path<String>,
    Json(body): Json<ExplanationBody>,
) -> Result<Json<Value>, ApiError> {
    state
        .explanation_cache
        .put(&subcategory, body.explanation)
        .await?;
    Ok(Json(json!({ "status": "success" })))
}
