//! Signup, login and current-user routes.

use axum::{
    extract::State,
    routing::{get, post},
    Form, Json, Router,
};

use super::error::{ApiError, CurrentUser};
use crate::models::user::{LoginForm, Token, User, UserCreate};
use crate::services::auth::{hash_password, verify_password, AuthError};
use crate::state::SharedState;

pub fn auth_routes() -> Router<SharedState> {
    Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
        .route("/signup/me", get(me))
}

async fn signup(
    State(state): State<SharedState>,
    Json(body): Json<UserCreate>,
) -> Result<Json<User>, ApiError> {
    body.validate().map_err(ApiError::unprocessable)?;

    let hashed = hash_password(&body.password);
    let record = state.db.create_user(&body.username, &body.email, &hashed)?;
    tracing::info!("[Auth] Registered user {}", record.username);
    Ok(Json(record.to_user()))
}

async fn login(
    State(state): State<SharedState>,
    Form(form): Form<LoginForm>,
) -> Result<Json<Token>, ApiError> {
    let user = state
        .db
        .find_user_by_username(&form.username)?
        .filter(|user| verify_password(&form.password, &user.hashed_password))
        .ok_or(AuthError::InvalidCredentials)?;

    let token = state.tokens.issue(&user.username)?;
    Ok(Json(Token::bearer(token)))
}

async fn me(CurrentUser(user): CurrentUser) -> Json<User> {
    Json(user.to_user())
}
