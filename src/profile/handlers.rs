use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{post, put},
    Json, Router,
};
use tracing::{info, instrument};

use super::{
    dto::{EducationInput, ExperienceInput, ProjectInput, SkillInput},
    repo,
    repo_types::{Education, Experience, Project, Skill},
};
use crate::{auth::extractors::CurrentUser, errors::AppError, state::AppState};

pub fn profile_routes() -> Router<AppState> {
    Router::new()
        .route("/profile/skills", post(add_skill))
        .route("/profile/skills/:skill_id", put(update_skill).delete(delete_skill))
        .route("/profile/projects", post(add_project))
        .route("/profile/experience", post(add_experience))
        .route("/profile/education", post(add_education))
}

#[instrument(skip(state, user, input), fields(user_id = user.user_id))]
pub async fn add_skill(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(input): Json<SkillInput>,
) -> Result<(StatusCode, Json<Skill>), AppError> {
    input.validate()?;
    let skill = repo::insert_skill(&state.db, user.user_id, &input).await?;
    info!(skill_id = skill.skill_id, "skill added");
    Ok((StatusCode::CREATED, Json(skill)))
}

#[instrument(skip(state, user, input), fields(user_id = user.user_id))]
pub async fn update_skill(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(skill_id): Path<i64>,
    Json(input): Json<SkillInput>,
) -> Result<Json<Skill>, AppError> {
    input.validate()?;
    repo::update_skill(&state.db, user.user_id, skill_id, &input)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Skill not found".into()))
}

#[instrument(skip(state, user), fields(user_id = user.user_id))]
pub async fn delete_skill(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(skill_id): Path<i64>,
) -> Result<StatusCode, AppError> {
    if !repo::delete_skill(&state.db, user.user_id, skill_id).await? {
        return Err(AppError::NotFound("Skill not found".into()));
    }
    Ok(StatusCode::NO_CONTENT)
}

#[instrument(skip(state, user, input), fields(user_id = user.user_id))]
pub async fn add_project(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(input): Json<ProjectInput>,
) -> Result<(StatusCode, Json<Project>), AppError> {
    input.validate()?;
    let project = repo::insert_project(&state.db, user.user_id, &input).await?;
    Ok((StatusCode::CREATED, Json(project)))
}

#[instrument(skip(state, user, input), fields(user_id = user.user_id))]
pub async fn add_experience(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(input): Json<ExperienceInput>,
) -> Result<(StatusCode, Json<Experience>), AppError> {
    input.validate()?;
    let exp = repo::insert_experience(&state.db, user.user_id, &input).await?;
    Ok((StatusCode::CREATED, Json(exp)))
}

#[instrument(skip(state, user, input), fields(user_id = user.user_id))]
pub async fn add_education(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(input): Json<EducationInput>,
) -> Result<(StatusCode, Json<Education>), AppError> {
    input.validate()?;
    let edu = repo::insert_education(&state.db, user.user_id, &input).await?;
    Ok((StatusCode::CREATED, Json(edu)))
}
