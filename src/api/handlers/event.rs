use axum::{extract::{Path, Query, State}, http::StatusCode, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::dtos::requests::{EventRequest, ListEventsQuery, MoveToStateRequest, ReconcilePromotersRequest, SubmitForReviewRequest};
use crate::api::dtos::responses::{ReconcileResponse, StateResponse};
use crate::error::AppError;
use std::sync::Arc;

pub async fn create_event(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<EventRequest>,
) -> Result<impl IntoResponse, AppError> {
    let (details, promoter_ids) = payload.into_parts();
    let created = state.lifecycle.create_draft(details, promoter_ids).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn list_events(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListEventsQuery>,
) -> Result<impl IntoResponse, AppError> {
    let events = state.lifecycle.list_events(query.state, query.promoter_id.as_deref()).await?;
    Ok(Json(events))
}

pub async fn get_event(
    State(state): State<Arc<AppState>>,
    Path(event_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let event = state.lifecycle.get_event(&event_id).await?;
    Ok(Json(event))
}

pub async fn update_event(
    State(state): State<Arc<AppState>>,
    Path(event_id): Path<String>,
    Json(payload): Json<EventRequest>,
) -> Result<impl IntoResponse, AppError> {
    let (details, promoter_ids) = payload.into_parts();
    let updated = state.lifecycle.update_draft(&event_id, details, promoter_ids).await?;
    Ok(Json(updated))
}

pub async fn delete_event(
    State(state): State<Arc<AppState>>,
    Path(event_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.lifecycle.delete_event(&event_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn reconcile_promoters(
    State(state): State<Arc<AppState>>,
    Path(event_id): Path<String>,
    Json(payload): Json<ReconcilePromotersRequest>,
) -> Result<impl IntoResponse, AppError> {
    let diff = state.lifecycle.reconcile_promoters(&event_id, payload.promoter_ids).await?;
    Ok(Json(ReconcileResponse { event_id, added: diff.to_add, removed: diff.to_remove }))
}

pub async fn move_forward(
    State(state): State<Arc<AppState>>,
    Path(event_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let new_state = state.lifecycle.move_forward(&event_id).await?;
    Ok(Json(StateResponse { event_id, state: new_state }))
}

pub async fn move_backwards(
    State(state): State<Arc<AppState>>,
    Path(event_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let new_state = state.lifecycle.move_backwards(&event_id).await?;
    Ok(Json(StateResponse { event_id, state: new_state }))
}

pub async fn move_to_state(
    State(state): State<Arc<AppState>>,
    Path(event_id): Path<String>,
    Json(payload): Json<MoveToStateRequest>,
) -> Result<impl IntoResponse, AppError> {
    let new_state = state.lifecycle.move_to_state(&event_id, payload.state).await?;
    Ok(Json(StateResponse { event_id, state: new_state }))
}

pub async fn submit_for_review(
    State(state): State<Arc<AppState>>,
    Path(event_id): Path<String>,
    Json(payload): Json<SubmitForReviewRequest>,
) -> Result<impl IntoResponse, AppError> {
    let new_state = state.lifecycle.submit_for_review(&event_id, &payload.promoter_id).await?;
    Ok(Json(StateResponse { event_id, state: new_state }))
}
