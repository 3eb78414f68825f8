use axum::{
    body::Body,
    extract::Request,
    routing::{get, post, put, delete},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use crate::state::AppState;
use crate::api::handlers::{account, booking, event, health, review};
use tower_http::{
    trace::TraceLayer,
    classify::ServerErrorsFailureClass,
};
use tracing::{info_span, Span, error, info};
use uuid::Uuid;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health_check))

        // Accounts
        .route("/api/v1/accounts", post(account::create_account))

        // Events & lifecycle
        .route("/api/v1/events", post(event::create_event).get(event::list_events))
        .route("/api/v1/events/{event_id}", get(event::get_event).put(event::update_event).delete(event::delete_event))
        .route("/api/v1/events/{event_id}/promoters", put(event::reconcile_promoters))
        .route("/api/v1/events/{event_id}/forward", post(event::move_forward))
        .route("/api/v1/events/{event_id}/backward", post(event::move_backwards))
        .route("/api/v1/events/{event_id}/state", post(event::move_to_state))
        .route("/api/v1/events/{event_id}/submit", post(event::submit_for_review))

        // Bookings
        .route("/api/v1/events/{event_id}/bookings", post(booking::create_booking).get(booking::list_bookings))
        .route("/api/v1/bookings/{booking_id}", delete(booking::delete_booking))

        // Reviews
        .route("/api/v1/events/{event_id}/reviews", post(review::create_review).get(review::list_reviews))
        .route("/api/v1/events/{event_id}/score", post(review::recompute_score))
        .route("/api/v1/reviews/{review_id}", delete(review::delete_review))

        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| {
                    let request_id = Uuid::new_v4().to_string();
                    info_span!(
                        "http_request",
                        request_id = %request_id,
                        method = ?request.method(),
                        uri = ?request.uri(),
                    )
                })
                .on_request(|request: &Request<Body>, _span: &Span| {
                    info!("started processing request: {} {}", request.method(), request.uri().path());
                })
                .on_response(|response: &axum::http::Response<Body>, latency: Duration, _span: &Span| {
                    info!(
                        status = response.status().as_u16(),
                        latency_ms = latency.as_millis(),
                        "finished processing request"
                    );
                })
                .on_failure(|error: ServerErrorsFailureClass, _latency: Duration, _span: &Span| {
                    error!("request failed: {:?}", error);
                })
        )
        .with_state(state)
}
