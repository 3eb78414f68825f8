use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

pub const MIN_SCORE: i32 = 1;
pub const MAX_SCORE: i32 = 5;
pub const MAX_TITLE_LEN: usize = 150;
pub const MAX_DESCRIPTION_LEN: usize = 2000;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Review {
    pub id: String,
    pub event_id: String,
    pub consumer_id: String,
    pub score: i32,
    pub title: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

pub struct NewReviewParams {
    pub event_id: String,
    pub consumer_id: String,
    pub score: i32,
    pub title: String,
    pub description: String,
}

impl Review {
    pub fn new(params: NewReviewParams) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            event_id: params.event_id,
            consumer_id: params.consumer_id,
            score: params.score,
            title: params.title,
            description: params.description,
            created_at: Utc::now(),
        }
    }
}

/// Result of a review write: the row plus the event average committed with it.
#[derive(Debug, Serialize, Clone)]
pub struct ScoredReview {
    pub review: Review,
    pub average_score: Option<f64>,
}
