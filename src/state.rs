use std::sync::Arc;
use crate::domain::ports::{
    AccountDirectory, BookingRepository, Clock, EventRepository,
    PromoterAssociationRepository, ReviewRepository,
};
use crate::domain::services::{
    capacity_guard::BookingCapacityGuard,
    lifecycle::EventLifecycleController,
    promoter_reconciler::PromoterReconciler,
    review_scores::ReviewScoreAggregator,
};
use crate::config::Config;

/// One storage backend's worth of repositories.
pub struct Repositories {
    pub accounts: Arc<dyn AccountDirectory>,
    pub events: Arc<dyn EventRepository>,
    pub associations: Arc<dyn PromoterAssociationRepository>,
    pub bookings: Arc<dyn BookingRepository>,
    pub reviews: Arc<dyn ReviewRepository>,
}

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub account_repo: Arc<dyn AccountDirectory>,
    pub lifecycle: Arc<EventLifecycleController>,
    pub capacity_guard: Arc<BookingCapacityGuard>,
    pub review_scores: Arc<ReviewScoreAggregator>,
}

impl AppState {
    pub fn assemble(config: Config, repos: Repositories, clock: Arc<dyn Clock>) -> Self {
        let reconciler = Arc::new(PromoterReconciler::new(repos.accounts.clone(), repos.associations.clone()));

        let lifecycle = Arc::new(EventLifecycleController::new(
            repos.events.clone(),
            repos.associations.clone(),
            repos.bookings.clone(),
            reconciler,
            clock.clone(),
        ));
        let capacity_guard = Arc::new(BookingCapacityGuard::new(
            repos.events.clone(),
            repos.accounts.clone(),
            repos.bookings.clone(),
        ));
        let review_scores = Arc::new(ReviewScoreAggregator::new(
            repos.events.clone(),
            repos.accounts.clone(),
            repos.reviews.clone(),
            clock,
        ));

        Self {
            config,
            account_repo: repos.accounts,
            lifecycle,
            capacity_guard,
            review_scores,
        }
    }
}
