use axum::{extract::{Path, State}, http::StatusCode, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::dtos::requests::CreateReviewRequest;
use crate::api::dtos::responses::ScoreResponse;
use crate::domain::services::review_scores::NewReview;
use crate::error::AppError;
use std::sync::Arc;

pub async fn create_review(
    State(state): State<Arc<AppState>>,
    Path(event_id): Path<String>,
    Json(payload): Json<CreateReviewRequest>,
) -> Result<impl IntoResponse, AppError> {
    let scored = state.review_scores.submit_review(&event_id, NewReview {
        consumer_id: payload.consumer_id,
        score: payload.score,
        title: payload.title,
        description: payload.description,
    }).await?;
    Ok((StatusCode::CREATED, Json(scored)))
}

pub async fn list_reviews(
    State(state): State<Arc<AppState>>,
    Path(event_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let reviews = state.review_scores.list_reviews(&event_id).await?;
    Ok(Json(reviews))
}

pub async fn delete_review(
    State(state): State<Arc<AppState>>,
    Path(review_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.review_scores.delete_review(&review_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn recompute_score(
    State(state): State<Arc<AppState>>,
    Path(event_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let average_score = state.review_scores.recompute_average_score(&event_id).await?;
    Ok(Json(ScoreResponse { event_id, average_score }))
}
