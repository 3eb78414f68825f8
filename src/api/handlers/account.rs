use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::dtos::requests::CreateAccountRequest;
use crate::domain::models::account::Account;
use crate::domain::services::validation::validate_account_fields;
use crate::error::AppError;
use std::sync::Arc;
use tracing::info;

pub async fn create_account(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateAccountRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_account_fields(&payload.email, &payload.name)?;

    let account = Account::new(payload.email.trim().to_string(), payload.name.trim().to_string(), payload.account_type);
    let created = state.account_repo.create(&account).await?;

    info!(account_id = %created.id, account_type = %created.account_type, "Account registered");
    Ok((StatusCode::CREATED, Json(created)))
}
