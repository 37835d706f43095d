use axum::{extract::State, routing::post, Json, Router};
use tracing::{info, instrument};

use super::{
    dto::{
        ChatRequest, ChatResponse, FeedbackRequest, FeedbackResponse, MarketInsights,
        MarketInsightsRequest, QuestionsRequest, QuestionsResponse, ResumeReviewRequest,
        ResumeReviewResponse, RoadmapRequest, RoadmapResponse,
    },
    services,
};
use crate::{
    auth::extractors::CurrentUser, errors::AppError, profile::repo::insert_interview_session,
    state::AppState,
};

/// Routes that need a bearer token.
pub fn member_routes() -> Router<AppState> {
    Router::new()
        .route("/career/generate-roadmap", post(generate_roadmap))
        .route("/interview/generate-questions", post(generate_questions))
        .route("/interview/feedback", post(interview_feedback))
}

pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/resume/review", post(review_resume))
        .route("/market-insights", post(market_insights))
        .route("/chatbot", post(chatbot))
}

#[instrument(skip(state, user, req), fields(user_id = user.user_id))]
pub async fn generate_roadmap(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(req): Json<RoadmapRequest>,
) -> Result<Json<RoadmapResponse>, AppError> {
    req.validate()?;
    let roadmap = services::career_roadmap(state.llm.as_ref(), &req.job_title).await?;
    Ok(Json(RoadmapResponse { roadmap }))
}

#[instrument(skip(state, user, req), fields(user_id = user.user_id))]
pub async fn generate_questions(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(req): Json<QuestionsRequest>,
) -> Result<Json<QuestionsResponse>, AppError> {
    req.validate()?;
    let questions = services::interview_questions(state.llm.as_ref(), &req.role).await?;
    Ok(Json(QuestionsResponse { questions }))
}

#[instrument(skip(state, user, req), fields(user_id = user.user_id))]
pub async fn interview_feedback(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(req): Json<FeedbackRequest>,
) -> Result<Json<FeedbackResponse>, AppError> {
    req.validate()?;
    let feedback =
        services::interview_feedback(state.llm.as_ref(), &req.question, &req.user_answer).await?;
    // Scoring is not implemented yet; sessions are stored with 0.
    let session = insert_interview_session(
        &state.db,
        user.user_id,
        &req.question,
        &req.user_answer,
        &feedback,
        0.0,
    )
    .await?;
    info!(session_id = session.session_id, "interview session saved");
    Ok(Json(FeedbackResponse { session }))
}

#[instrument(skip(state, req))]
pub async fn review_resume(
    State(state): State<AppState>,
    Json(req): Json<ResumeReviewRequest>,
) -> Result<Json<ResumeReviewResponse>, AppError> {
    req.validate()?;
    let feedback = services::resume_review(state.llm.as_ref(), &req).await?;
    Ok(Json(ResumeReviewResponse { feedback }))
}

#[instrument(skip(state, req))]
pub async fn market_insights(
    State(state): State<AppState>,
    Json(req): Json<MarketInsightsRequest>,
) -> Result<Json<MarketInsights>, AppError> {
    req.validate()?;
    Ok(Json(
        services::market_insights(state.llm.as_ref(), &req.job_title).await?,
    ))
}

#[instrument(skip(state, req))]
pub async fn chatbot(
    State(state): State<AppState>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    req.validate()?;
    let response = services::chat(state.llm.as_ref(), &req.message).await?;
    Ok(Json(ChatResponse { response }))
}
