use std::path::Path;

use axum::{
    extract::{Path as UrlPath, State},
    routing::get,
    Json, Router,
};

use super::error::ApiError;
use crate::services::subjects::SubjectCatalog;
use crate::state::SharedState;

pub fn subject_routes() -> Router<SharedState> {
    Router::new()
        .route("/api/subjects/categories", get(categories))
        .route("/api/subjects/subcategories/:category", get(subcategories))
}

fn catalog(state: &SharedState) -> Result<SubjectCatalog, ApiError> {
    Ok(SubjectCatalog::load(Path::new(&state.config.subjects_path))?)
}

async fn categories(State(state): State<SharedState>) -> Result<Json<Vec<String>>, ApiError> {
    Ok(Json(catalog(&state)?.categories()))
}

async fn subcategories(
    State(state): State<SharedState>,
    UrlPath(category): UrlPath<String>,
) -> Result<Json<Vec<String>>, ApiError> {
    Ok(Json(catalog(&state)?.subcategories(&category)?))
}
