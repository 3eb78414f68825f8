use std::sync::Arc;
use tracing::{info, warn};

use crate::domain::{
    models::{
        association::PromoterDiff,
        event::{Event, EventDetails, PromotedEvent},
        event_state::{EventState, Transition},
    },
    ports::{BookingRepository, Clock, EventRepository, PromoterAssociationRepository},
    services::{promoter_reconciler::PromoterReconciler, validation::validate_event_details},
};
use crate::error::AppError;

/// Entry point for everything that changes an event row: draft authoring,
/// promoter reconciliation, and state transitions.
pub struct EventLifecycleController {
    events: Arc<dyn EventRepository>,
    associations: Arc<dyn PromoterAssociationRepository>,
    bookings: Arc<dyn BookingRepository>,
    reconciler: Arc<PromoterReconciler>,
    clock: Arc<dyn Clock>,
}

impl EventLifecycleController {
    pub fn new(
        events: Arc<dyn EventRepository>,
        associations: Arc<dyn PromoterAssociationRepository>,
        bookings: Arc<dyn BookingRepository>,
        reconciler: Arc<PromoterReconciler>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self { events, associations, bookings, reconciler, clock }
    }

    async fn load(&self, event_id: &str) -> Result<Event, AppError> {
        self.events.find_by_id(event_id).await?
            .ok_or(AppError::NotFound("Event not found".into()))
    }

    async fn with_associations(&self, event: Event) -> Result<PromotedEvent, AppError> {
        let promoter_ids = self.associations.promoter_ids(&event.id).await?;
        let current_participants = self.bookings.count_by_event(&event.id).await?;
        Ok(PromotedEvent { event, promoter_ids, current_participants })
    }

    pub async fn get_event(&self, event_id: &str) -> Result<PromotedEvent, AppError> {
        let event = self.load(event_id).await?;
        self.with_associations(event).await
    }

    /// Events ordered by start, optionally narrowed to one state and/or one promoter.
    pub async fn list_events(&self, state: Option<EventState>, promoter_id: Option<&str>) -> Result<Vec<Event>, AppError> {
        self.events.list(state, promoter_id).await
    }

    pub async fn create_draft(&self, details: EventDetails, promoter_ids: Vec<String>) -> Result<PromotedEvent, AppError> {
        validate_event_details(&details, self.clock.now())?;
        let diff = self.reconciler.plan_initial(promoter_ids).await?;

        let event = Event::new_draft(details);
        let created = self.events.create_with_promoters(&event, &diff.to_add).await?;

        info!(event_id = %created.id, promoters = diff.to_add.len(), "Draft created");
        Ok(PromotedEvent { event: created, promoter_ids: diff.to_add, current_participants: 0 })
    }

    /// Rewrites the draft fields and reconciles its promoters in one transaction.
    pub async fn update_draft(
        &self,
        event_id: &str,
        details: EventDetails,
        promoter_ids: Vec<String>,
    ) -> Result<PromotedEvent, AppError> {
        let mut event = self.load(event_id).await?;
        event.state.ensure_editable()?;
        validate_event_details(&details, self.clock.now())?;

        let diff = self.reconciler.plan(&event.id, promoter_ids).await?;
        event.apply_details(details);

        let updated = self.events.update_draft(&event, &diff).await?;
        info!(event_id = %updated.id, version = updated.version, "Draft updated");
        self.with_associations(updated).await
    }

    pub async fn reconcile_promoters(&self, event_id: &str, desired: Vec<String>) -> Result<PromoterDiff, AppError> {
        let event = self.load(event_id).await?;
        event.state.ensure_editable()?;

        let diff = self.reconciler.plan(&event.id, desired).await?;
        if diff.is_empty() {
            return Ok(diff);
        }

        self.events.update_draft(&event, &diff).await?;
        info!(
            event_id = %event.id,
            added = diff.to_add.len(),
            removed = diff.to_remove.len(),
            "Promoters reconciled"
        );
        Ok(diff)
    }

    pub async fn move_forward(&self, event_id: &str) -> Result<EventState, AppError> {
        self.step(event_id, Transition::Forward).await
    }

    pub async fn move_backwards(&self, event_id: &str) -> Result<EventState, AppError> {
        self.step(event_id, Transition::Backward).await
    }

    async fn step(&self, event_id: &str, transition: Transition) -> Result<EventState, AppError> {
        let event = self.load(event_id).await?;
        let next = event.state.apply(transition)?;

        let updated = self.events.update_state(&event.id, event.version, next).await?;
        info!(event_id = %updated.id, from = %event.state, to = %updated.state, "Event state changed");
        Ok(updated.state)
    }

    /// Draft -> Review, allowed only for a promoter associated with the event.
    pub async fn submit_for_review(&self, event_id: &str, promoter_id: &str) -> Result<EventState, AppError> {
        let event = self.load(event_id).await?;
        let promoters = self.associations.promoter_ids(&event.id).await?;

        if !promoters.contains(promoter_id) {
            return Err(AppError::Forbidden("Promoter is not associated with this event".into()));
        }
        if event.state != EventState::Draft {
            return Err(AppError::InvalidStateTransition { from: event.state, transition: Transition::Forward });
        }

        let updated = self.events.update_state(&event.id, event.version, EventState::Review).await?;
        info!(event_id = %updated.id, promoter_id = %promoter_id, "Draft submitted for review");
        Ok(updated.state)
    }

    /// Administrative jump to any state. The event must satisfy everything the
    /// stepwise path would have required of it on the way there.
    pub async fn move_to_state(&self, event_id: &str, target: EventState) -> Result<EventState, AppError> {
        let event = self.load(event_id).await?;
        if event.state == target {
            return Ok(target);
        }

        validate_event_details(&event.details(), self.clock.now())?;
        if self.associations.promoter_ids(&event.id).await?.is_empty() {
            return Err(AppError::EmptyPromoterSet);
        }

        let updated = self.events.update_state(&event.id, event.version, target).await?;
        warn!(event_id = %updated.id, from = %event.state, to = %target, "Event state set directly");
        Ok(updated.state)
    }

    pub async fn delete_event(&self, event_id: &str) -> Result<(), AppError> {
        self.events.delete(event_id).await?;
        info!(event_id = %event_id, "Event deleted");
        Ok(())
    }
}
