mod common;

use common::TestApp;
use promo_events_backend::{
    domain::models::association::PromoterDiff,
    domain::ports::EventRepository,
    error::AppError,
    infra::repositories::sqlite_event_repo::SqliteEventRepo,
};
use std::collections::BTreeSet;

fn set<S: AsRef<str>>(ids: &[S]) -> BTreeSet<String> {
    ids.iter().map(|s| s.as_ref().to_string()).collect()
}

async fn stored_promoters(app: &TestApp, event_id: &str) -> BTreeSet<String> {
    app.state.lifecycle.get_event(event_id).await.unwrap().promoter_ids
}

#[tokio::test]
async fn test_reconcile_adds_new_and_removes_stale() {
    let app = TestApp::new().await;
    let p1 = app.promoter().await;
    let p2 = app.promoter().await;
    let p3 = app.promoter().await;
    let event = app.draft(&[&p1.id, &p2.id], 10).await;

    let diff = app.state.lifecycle
        .reconcile_promoters(&event.event.id, vec![p2.id.clone(), p3.id.clone()])
        .await
        .unwrap();

    assert_eq!(diff.to_add, set(&[&p3.id]));
    assert_eq!(diff.to_remove, set(&[&p1.id]));
    assert_eq!(stored_promoters(&app, &event.event.id).await, set(&[&p2.id, &p3.id]));
}

#[tokio::test]
async fn test_reconcile_to_same_set_changes_nothing() {
    let app = TestApp::new().await;
    let p1 = app.promoter().await;
    let event = app.draft(&[&p1.id], 10).await;

    let diff = app.state.lifecycle.reconcile_promoters(&event.event.id, vec![p1.id.clone(), p1.id.clone()]).await.unwrap();
    assert!(diff.is_empty());

    let stored = app.state.lifecycle.get_event(&event.event.id).await.unwrap();
    assert_eq!(stored.event.version, 0);
    assert_eq!(stored.promoter_ids, set(&[&p1.id]));
}

#[tokio::test]
async fn test_empty_promoter_set_is_rejected_and_associations_kept() {
    let app = TestApp::new().await;
    let p1 = app.promoter().await;
    let p2 = app.promoter().await;
    let event = app.draft(&[&p1.id, &p2.id], 10).await;

    let err = app.state.lifecycle.reconcile_promoters(&event.event.id, vec![]).await.unwrap_err();
    assert!(matches!(err, AppError::EmptyPromoterSet));
    assert_eq!(stored_promoters(&app, &event.event.id).await, set(&[&p1.id, &p2.id]));

    let err = app.state.lifecycle.create_draft(app.details(10), vec![]).await.unwrap_err();
    assert!(matches!(err, AppError::EmptyPromoterSet));
}

#[tokio::test]
async fn test_non_promoter_accounts_cannot_be_associated() {
    let app = TestApp::new().await;
    let p1 = app.promoter().await;
    let consumer = app.consumer().await;
    let event = app.draft(&[&p1.id], 10).await;

    let err = app.state.lifecycle
        .reconcile_promoters(&event.event.id, vec![consumer.id.clone()])
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidPromoter(_)));

    let err = app.state.lifecycle
        .reconcile_promoters(&event.event.id, vec!["no-such-account".to_string()])
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidPromoter(_)));

    assert_eq!(stored_promoters(&app, &event.event.id).await, set(&[&p1.id]));
}

#[tokio::test]
async fn test_stale_removal_rolls_back_the_whole_batch() {
    let app = TestApp::new().await;
    let p1 = app.promoter().await;
    let p2 = app.promoter().await;
    let event = app.draft(&[&p1.id], 10).await;

    // A diff planned against a set that no longer matches storage.
    let stale = PromoterDiff { to_add: set(&[&p2.id]), to_remove: set(&["ghost"]) };
    let events = SqliteEventRepo::new(app.pool.clone());
    let err = events.update_draft(&event.event, &stale).await.unwrap_err();
    assert!(matches!(err, AppError::Consistency(_)));

    let stored = app.state.lifecycle.get_event(&event.event.id).await.unwrap();
    assert_eq!(stored.promoter_ids, set(&[&p1.id]));
    assert_eq!(stored.event.version, 0);
}

#[tokio::test]
async fn test_update_draft_replaces_promoters_with_fields() {
    let app = TestApp::new().await;
    let p1 = app.promoter().await;
    let p2 = app.promoter().await;
    let event = app.draft(&[&p1.id], 10).await;

    let updated = app.state.lifecycle
        .update_draft(&event.event.id, app.details(20), vec![p2.id.clone()])
        .await
        .unwrap();

    assert_eq!(updated.promoter_ids, set(&[&p2.id]));
    assert_eq!(updated.event.max_participants, 20);
    assert_eq!(updated.event.version, 1);
}
