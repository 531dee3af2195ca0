//! Learning profile CRUD for the current user.

use axum::{
    extract::State,
    routing::post,
    Json, Router,
};
use serde_json::{json, Value};

use super::error::{ApiError, CurrentUser};
use crate::models::profile::{LearningProfile, LearningProfileInput};
use crate::state::SharedState;
use crate::utils::error::AppError;

pub fn profile_routes() -> Router<SharedState> {
    Router::new().route(
        "/assessment/profile",
        post(create_profile)
            .get(get_profile)
            .put(update_profile)
            .delete(delete_profile),
    )
}

async fn create_profile(
    State(state): State<SharedState>,
    CurrentUser(user): CurrentUser,
    Json(input): Json<LearningProfileInput>,
) -> Result<Json<LearningProfile>, ApiError> {
    Ok(Json(state.db.create_learning_profile(user.id, input)?))
}

async fn get_profile(
    State(state): State<SharedState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<LearningProfile>, ApiError> {
    state
        .db
        .get_learning_profile(user.id)?
        .map(Json)
        .ok_or_else(|| AppError::not_found("Learning profile not found").into())
}

async fn update_profile(
    State(state): State<SharedState>,
    CurrentUser(user): CurrentUser,
    Json(input): Json<LearningProfileInput>,
) -> Result<Json<LearningProfile>, ApiError> {
    Ok(Json(state.db.update_learning_profile(user.id, input)?))
}

async fn delete_profile(
    State(state): State<SharedState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<Value>, ApiError> {
    state.db.delete_learning_profile(user.id)?;
    Ok(Json(json!({ "message": "Learning profile deleted successfully" })))
}
