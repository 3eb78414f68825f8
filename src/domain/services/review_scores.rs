use std::sync::Arc;
use tracing::info;

use crate::domain::{
    models::{event_state::EventState, review::{NewReviewParams, Review, ScoredReview}},
    ports::{AccountDirectory, Clock, EventRepository, ReviewRepository},
    services::validation::validate_review_fields,
};
use crate::error::AppError;

/// Arithmetic mean of the scores, `None` for an event nobody has reviewed.
pub fn mean_score(scores: &[i32]) -> Option<f64> {
    if scores.is_empty() {
        return None;
    }
    let total: i64 = scores.iter().map(|s| *s as i64).sum();
    Some(total as f64 / scores.len() as f64)
}

pub struct NewReview {
    pub consumer_id: String,
    pub score: i32,
    pub title: String,
    pub description: String,
}

/// Owns every write that can change an event's average score, and recomputes
/// the average in the same transaction as the write.
pub struct ReviewScoreAggregator {
    events: Arc<dyn EventRepository>,
    accounts: Arc<dyn AccountDirectory>,
    reviews: Arc<dyn ReviewRepository>,
    clock: Arc<dyn Clock>,
}

impl ReviewScoreAggregator {
    pub fn new(
        events: Arc<dyn EventRepository>,
        accounts: Arc<dyn AccountDirectory>,
        reviews: Arc<dyn ReviewRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self { events, accounts, reviews, clock }
    }

    pub async fn submit_review(&self, event_id: &str, new_review: NewReview) -> Result<ScoredReview, AppError> {
        validate_review_fields(new_review.score, &new_review.title, &new_review.description)?;

        let event = self.events.find_by_id(event_id).await?
            .ok_or(AppError::NotFound("Event not found".into()))?;

        if event.state != EventState::Published {
            return Err(AppError::NotReviewable(event.state));
        }
        if !event.is_over(self.clock.now()) {
            return Err(AppError::Validation("Event has not finished yet.".into()));
        }

        self.accounts.lookup(&new_review.consumer_id).await?
            .ok_or(AppError::NotFound("Account not found".into()))?;

        let review = Review::new(NewReviewParams {
            event_id: event.id.clone(),
            consumer_id: new_review.consumer_id,
            score: new_review.score,
            title: new_review.title,
            description: new_review.description,
        });

        let scored = self.reviews.create_and_refresh(&review).await?;
        info!(event_id = %event.id, review_id = %scored.review.id, average = ?scored.average_score, "Review recorded");
        Ok(scored)
    }

    pub async fn delete_review(&self, review_id: &str) -> Result<Option<f64>, AppError> {
        let review = self.reviews.find_by_id(review_id).await?
            .ok_or(AppError::NotFound("Review not found".into()))?;

        let average = self.reviews.delete_and_refresh(&review.id).await?;
        info!(event_id = %review.event_id, review_id = %review.id, average = ?average, "Review deleted");
        Ok(average)
    }

    pub async fn recompute_average_score(&self, event_id: &str) -> Result<Option<f64>, AppError> {
        self.events.find_by_id(event_id).await?
            .ok_or(AppError::NotFound("Event not found".into()))?;
        self.reviews.refresh_average(event_id).await
    }

    pub async fn list_reviews(&self, event_id: &str) -> Result<Vec<Review>, AppError> {
        self.events.find_by_id(event_id).await?
            .ok_or(AppError::NotFound("Event not found".into()))?;
        self.reviews.list_by_event(event_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_of_no_scores_is_none() {
        assert_eq!(mean_score(&[]), None);
    }

    #[test]
    fn mean_follows_inserts_and_deletes() {
        assert_eq!(mean_score(&[5, 3, 4]), Some(4.0));
        assert_eq!(mean_score(&[5, 4]), Some(4.5));
        assert_eq!(mean_score(&[1]), Some(1.0));
    }
}
