use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Form, Json, Router,
};
use tracing::{info, instrument};

use crate::{
    auth::{
        dto::{LoginForm, PublicUser, RegisterRequest, TokenResponse},
        extractors::CurrentUser,
        services,
    },
    errors::AppError,
    profile::{self, dto::UserProfile},
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/token", post(login))
}

pub fn me_routes() -> Router<AppState> {
    Router::new().route("/users/me", get(get_me).delete(delete_me))
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<PublicUser>), AppError> {
    let user = services::register(state.users.as_ref(), payload).await?;
    Ok((StatusCode::CREATED, Json(PublicUser::from(user))))
}

#[instrument(skip(state, form))]
pub async fn login(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> Result<Json<TokenResponse>, AppError> {
    let token = services::login(
        &state.jwt,
        state.users.as_ref(),
        &form.username,
        &form.password,
    )
    .await?;
    Ok(Json(token))
}

#[instrument(skip(state, user), fields(user_id = user.user_id))]
pub async fn get_me(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<UserProfile>, AppError> {
    let sections = profile::repo::load_sections(&state.db, user.user_id).await?;
    Ok(Json(UserProfile::new(PublicUser::from(user), sections)))
}

#[instrument(skip(state, user), fields(user_id = user.user_id))]
pub async fn delete_me(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<StatusCode, AppError> {
    let deleted = state
        .users
        .delete(user.user_id)
        .await
        .map_err(crate::auth::errors::AuthError::from)?;
    if !deleted {
        // Raced with another delete; the token no longer names anyone.
        return Err(AppError::Unauthenticated);
    }
    info!(user_id = user.user_id, "account deleted");
    Ok(StatusCode::NO_CONTENT)
}
