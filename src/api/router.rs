use std::time::Duration;

use axum::{
    routing::{delete, get, patch, post, put},
    Router,
};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use super::health;
use super::state::AppState;
use super::subscriptions;

/// Create the full router with application state.
///
/// Every route is bounded by `request_timeout`; a request that outlives
/// it is aborted and answered with a timeout status.
pub fn create_router_with_state(state: AppState, request_timeout: Duration) -> Router {
    Router::new()
        // Health endpoints
        .route("/health", get(health::health_check))
        .route("/ready", get(health::ready_check))
        .route("/live", get(health::live_check))
        // Subscription CRUD
        .route("/subscriptions", post(subscriptions::create_subscription))
        .route("/subscriptions", get(subscriptions::list_subscriptions))
        .route("/subscriptions/{id}", get(subscriptions::get_subscription))
        .route("/subscriptions/{id}", put(subscriptions::update_subscription))
        .route(
            "/subscriptions/{id}",
            patch(subscriptions::patch_subscription),
        )
        .route(
            "/subscriptions/{id}",
            delete(subscriptions::delete_subscription),
        )
        // Cost aggregation
        .route("/subscriptions/cost", post(subscriptions::subscription_cost))
        // State and middleware
        .with_state(state)
        .layer(TimeoutLayer::new(request_timeout))
        .layer(TraceLayer::new_for_http())
}
