mod common;

use chrono::Duration;
use common::TestApp;
use promo_events_backend::{
    domain::models::event_state::{EventState, Transition},
    domain::ports::{Clock, EventRepository},
    error::AppError,
    infra::repositories::sqlite_event_repo::SqliteEventRepo,
};
use std::sync::Arc;
use tokio::task::JoinSet;

#[tokio::test]
async fn test_forward_and_backward_walk_the_state_table() {
    let app = TestApp::new().await;
    let promoter = app.promoter().await;
    let event = app.draft(&[&promoter.id], 10).await;
    let id = event.event.id.clone();
    let lifecycle = &app.state.lifecycle;

    assert_eq!(event.event.state, EventState::Draft);

    let err = lifecycle.move_backwards(&id).await.unwrap_err();
    assert!(matches!(err, AppError::InvalidStateTransition { from: EventState::Draft, transition: Transition::Backward }));

    assert_eq!(lifecycle.move_forward(&id).await.unwrap(), EventState::Review);
    assert_eq!(lifecycle.move_forward(&id).await.unwrap(), EventState::Published);

    let err = lifecycle.move_forward(&id).await.unwrap_err();
    assert!(matches!(err, AppError::InvalidStateTransition { from: EventState::Published, transition: Transition::Forward }));

    assert_eq!(lifecycle.move_backwards(&id).await.unwrap(), EventState::Review);
    assert_eq!(lifecycle.move_backwards(&id).await.unwrap(), EventState::Draft);

    let stored = lifecycle.get_event(&id).await.unwrap();
    assert_eq!(stored.event.state, EventState::Draft);
    assert_eq!(stored.event.version, 4);
}

#[tokio::test]
async fn test_failed_transition_leaves_state_untouched() {
    let app = TestApp::new().await;
    let event = app.published(5).await;
    let before = app.state.lifecycle.get_event(&event.event.id).await.unwrap();

    assert!(app.state.lifecycle.move_forward(&event.event.id).await.is_err());

    let after = app.state.lifecycle.get_event(&event.event.id).await.unwrap();
    assert_eq!(after.event.state, EventState::Published);
    assert_eq!(after.event.version, before.event.version);
}

#[tokio::test]
async fn test_only_drafts_can_be_edited() {
    let app = TestApp::new().await;
    let promoter = app.promoter().await;
    let event = app.draft(&[&promoter.id], 10).await;
    let id = event.event.id.clone();

    let mut details = app.details(12);
    details.title = "Harbour lights, extended".into();
    let updated = app.state.lifecycle.update_draft(&id, details.clone(), vec![promoter.id.clone()]).await.unwrap();
    assert_eq!(updated.event.title, "Harbour lights, extended");
    assert_eq!(updated.event.max_participants, 12);

    app.state.lifecycle.move_forward(&id).await.unwrap();

    let err = app.state.lifecycle.update_draft(&id, details, vec![promoter.id.clone()]).await.unwrap_err();
    assert!(matches!(err, AppError::EditNotAllowed(EventState::Review)));
    assert_eq!(err.to_string(), "Event cannot be edited in the current state: REVIEW");

    let err = app.state.lifecycle.reconcile_promoters(&id, vec![promoter.id.clone()]).await.unwrap_err();
    assert!(matches!(err, AppError::EditNotAllowed(EventState::Review)));
}

#[tokio::test]
async fn test_draft_validation_rejects_past_and_blank_fields() {
    let app = TestApp::new().await;
    let promoter = app.promoter().await;

    let mut past = app.details(10);
    past.date = (app.clock.now() - Duration::days(1)).date_naive();
    let err = app.state.lifecycle.create_draft(past, vec![promoter.id.clone()]).await.unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    let mut blank = app.details(10);
    blank.title = " ".into();
    let err = app.state.lifecycle.create_draft(blank, vec![promoter.id.clone()]).await.unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    let no_seats = app.details(0);
    let err = app.state.lifecycle.create_draft(no_seats, vec![promoter.id]).await.unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn test_submit_for_review_requires_associated_promoter() {
    let app = TestApp::new().await;
    let promoter = app.promoter().await;
    let outsider = app.promoter().await;
    let event = app.draft(&[&promoter.id], 10).await;
    let id = event.event.id.clone();

    let err = app.state.lifecycle.submit_for_review(&id, &outsider.id).await.unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));

    assert_eq!(app.state.lifecycle.submit_for_review(&id, &promoter.id).await.unwrap(), EventState::Review);

    let err = app.state.lifecycle.submit_for_review(&id, &promoter.id).await.unwrap_err();
    assert!(matches!(err, AppError::InvalidStateTransition { from: EventState::Review, .. }));
}

#[tokio::test]
async fn test_move_to_state_jumps_and_revalidates() {
    let app = TestApp::new().await;
    let promoter = app.promoter().await;
    let event = app.draft(&[&promoter.id], 10).await;
    let id = event.event.id.clone();

    assert_eq!(app.state.lifecycle.move_to_state(&id, EventState::Draft).await.unwrap(), EventState::Draft);
    assert_eq!(app.state.lifecycle.get_event(&id).await.unwrap().event.version, 0);

    assert_eq!(app.state.lifecycle.move_to_state(&id, EventState::Published).await.unwrap(), EventState::Published);

    // Once the start has passed the event no longer qualifies for any state change by jump.
    app.clock.advance(Duration::days(30));
    let err = app.state.lifecycle.move_to_state(&id, EventState::Draft).await.unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
    assert_eq!(app.state.lifecycle.get_event(&id).await.unwrap().event.state, EventState::Published);
}

#[tokio::test]
async fn test_stale_version_is_reported_as_concurrent_modification() {
    let app = TestApp::new().await;
    let promoter = app.promoter().await;
    let event = app.draft(&[&promoter.id], 10).await;

    app.state.lifecycle.move_forward(&event.event.id).await.unwrap();

    let events = SqliteEventRepo::new(app.pool.clone());
    let err = events.update_state(&event.event.id, event.event.version, EventState::Published).await.unwrap_err();
    assert!(matches!(err, AppError::ConcurrentModification(_)));
}

#[tokio::test]
async fn test_list_filters_by_state_and_delete_removes() {
    let app = TestApp::new().await;
    let promoter = app.promoter().await;
    let draft = app.draft(&[&promoter.id], 10).await;
    let published = app.published(10).await;

    let drafts = app.state.lifecycle.list_events(Some(EventState::Draft), None).await.unwrap();
    assert_eq!(drafts.len(), 1);
    assert_eq!(drafts[0].id, draft.event.id);

    let all = app.state.lifecycle.list_events(None, None).await.unwrap();
    assert_eq!(all.len(), 2);

    app.state.lifecycle.delete_event(&published.event.id).await.unwrap();
    let err = app.state.lifecycle.get_event(&published.event.id).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
    let err = app.state.lifecycle.delete_event(&published.event.id).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn test_list_filters_by_promoter() {
    let app = TestApp::new().await;
    let p1 = app.promoter().await;
    let p2 = app.promoter().await;
    let shared = app.draft(&[&p1.id, &p2.id], 10).await;
    let own = app.draft(&[&p1.id], 10).await;
    let other = app.draft(&[&p2.id], 10).await;

    let mut ids: Vec<String> = app.state.lifecycle.list_events(None, Some(&p1.id)).await.unwrap()
        .into_iter().map(|e| e.id).collect();
    ids.sort();
    let mut expected = vec![shared.event.id.clone(), own.event.id.clone()];
    expected.sort();
    assert_eq!(ids, expected);

    app.state.lifecycle.move_forward(&other.event.id).await.unwrap();
    let reviewing = app.state.lifecycle.list_events(Some(EventState::Review), Some(&p2.id)).await.unwrap();
    assert_eq!(reviewing.len(), 1);
    assert_eq!(reviewing[0].id, other.event.id);

    assert!(app.state.lifecycle.list_events(None, Some("nobody")).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_concurrent_forward_moves_one_step_at_a_time() {
    let app = TestApp::new().await;
    let promoter = app.promoter().await;
    let event = app.draft(&[&promoter.id], 10).await;

    let lifecycle = Arc::clone(&app.state.lifecycle);
    let mut set = JoinSet::new();
    for _ in 0..10 {
        let lifecycle = lifecycle.clone();
        let event_id = event.event.id.clone();
        set.spawn(async move { lifecycle.move_forward(&event_id).await });
    }

    let mut to_review = 0;
    let mut to_published = 0;
    while let Some(result) = set.join_next().await {
        match result.expect("transition task panicked") {
            Ok(EventState::Review) => to_review += 1,
            Ok(EventState::Published) => to_published += 1,
            Ok(EventState::Draft) => panic!("forward never lands on Draft"),
            Err(AppError::ConcurrentModification(_)) | Err(AppError::InvalidStateTransition { .. }) => {}
            Err(other) => panic!("unexpected transition error: {:?}", other),
        }
    }

    // Each committed step was taken exactly once, never skipping Review.
    assert_eq!(to_review, 1);
    assert!(to_published <= 1);
    let stored = app.state.lifecycle.get_event(&event.event.id).await.unwrap().event;
    assert_eq!(stored.version, 1 + to_published);
    let expected = if to_published == 1 { EventState::Published } else { EventState::Review };
    assert_eq!(stored.state, expected);
}
