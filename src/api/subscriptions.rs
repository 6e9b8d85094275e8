//! Subscription CRUD and cost aggregation endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
};
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::{
    ApiError, CostRequest, CostResponse, Json, ListSubscriptionsResponse, SubscriptionRequest,
    SubscriptionResponse,
};
use crate::domain::subscription::SubscriptionId;

/// POST /subscriptions
pub async fn create_subscription(
    State(state): State<AppState>,
    Json(request): Json<SubscriptionRequest>,
) -> Result<(StatusCode, Json<SubscriptionResponse>), ApiError> {
    debug!(service = %request.service_name, "Creating subscription");

    let record = request.to_domain().map_err(ApiError::from)?;
    let created = state.subscriptions.create(record).await.map_err(ApiError::from)?;

    Ok((StatusCode::CREATED, Json(SubscriptionResponse::from(&created))))
}

/// GET /subscriptions/{id}
pub async fn get_subscription(
    State(state): State<AppState>,
    Path(id): Path<SubscriptionId>,
) -> Result<Json<SubscriptionResponse>, ApiError> {
    debug!(id = %id, "Getting subscription");

    let record = state
        .subscriptions
        .get(id)
        .await
        .map_err(ApiError::from)?
        .ok_or_else(|| ApiError::not_found(format!("Subscription {} not found", id)))?;

    Ok(Json(SubscriptionResponse::from(&record)))
}

/// GET /subscriptions
pub async fn list_subscriptions(
    State(state): State<AppState>,
) -> Result<Json<ListSubscriptionsResponse>, ApiError> {
    debug!("Listing subscriptions");

    let records = state.subscriptions.list().await.map_err(ApiError::from)?;

    let subscriptions: Vec<SubscriptionResponse> =
        records.iter().map(SubscriptionResponse::from).collect();
    let total = subscriptions.len();

    Ok(Json(ListSubscriptionsResponse {
        subscriptions,
        total,
    }))
}

/// PUT /subscriptions/{id}
pub async fn update_subscription(
    State(state): State<AppState>,
    Path(id): Path<SubscriptionId>,
    Json(request): Json<SubscriptionRequest>,
) -> Result<Json<SubscriptionResponse>, ApiError> {
    debug!(id = %id, "Updating subscription");

    let record = request.to_domain().map_err(ApiError::from)?;
    let updated = state
        .subscriptions
        .update(id, record)
        .await
        .map_err(ApiError::from)?;

    Ok(Json(SubscriptionResponse::from(&updated)))
}

/// PATCH /subscriptions/{id}
pub async fn patch_subscription(
    State(state): State<AppState>,
    Path(id): Path<SubscriptionId>,
    Json(request): Json<SubscriptionRequest>,
) -> Result<Json<SubscriptionResponse>, ApiError> {
    debug!(id = %id, "Patching subscription");

    let patch = request.to_patch().map_err(ApiError::from)?;
    let updated = state
        .subscriptions
        .patch(id, patch)
        .await
        .map_err(ApiError::from)?;

    Ok(Json(SubscriptionResponse::from(&updated)))
}

/// DELETE /subscriptions/{id}
pub async fn delete_subscription(
    State(state): State<AppState>,
    Path(id): Path<SubscriptionId>,
) -> Result<StatusCode, ApiError> {
    debug!(id = %id, "Deleting subscription");

    state.subscriptions.delete(id).await.map_err(ApiError::from)?;

    Ok(StatusCode::NO_CONTENT)
}

/// POST /subscriptions/cost
pub async fn subscription_cost(
    State(state): State<AppState>,
    Json(request): Json<CostRequest>,
) -> Result<Json<CostResponse>, ApiError> {
    let filter = request.to_filter().map_err(ApiError::from)?;
    debug!(?filter, "Calculating subscription cost");

    let cost = state
        .subscriptions
        .total_cost(filter)
        .await
        .map_err(ApiError::from)?;

    Ok(Json(CostResponse { cost }))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use axum::body::Body;
    use axum::http::{header, Method, Request, StatusCode};
    use axum::Router;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::api::router::create_router_with_state;
    use crate::api::state::AppState;
    use crate::infrastructure::subscription::{
        InMemorySubscriptionRepository, SubscriptionService,
    };

    fn test_app() -> Router {
        let repository = Arc::new(InMemorySubscriptionRepository::new());
        let service = SubscriptionService::new(repository);
        let state = AppState::new(Arc::new(service));

        create_router_with_state(state, Duration::from_secs(5))
    }

    fn json_request(method: Method, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn create_body() -> Value {
        json!({
            "service_name": "Yandex Plus",
            "price": 399,
            "user_id": "60601fee-2bf1-4721-ae6f-7636e79a0cba",
            "start_date": "07-2025"
        })
    }

    #[tokio::test]
    async fn test_create_returns_201_with_record() {
        let app = test_app();

        let response = app
            .oneshot(json_request(Method::POST, "/subscriptions", create_body()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);

        let body = body_json(response).await;
        assert!(body["id"].is_i64());
        assert_eq!(body["service_name"], "Yandex Plus");
        assert_eq!(body["price"], 399);
        assert_eq!(body["start_date"], "07-2025");
        assert_eq!(body["end_date"], Value::Null);
    }

    #[tokio::test]
    async fn test_create_then_get_round_trips() {
        let app = test_app();

        let created = body_json(
            app.clone()
                .oneshot(json_request(Method::POST, "/subscriptions", create_body()))
                .await
                .unwrap(),
        )
        .await;
        let id = created["id"].as_i64().unwrap();

        let response = app
            .oneshot(
                Request::builder()
                    .uri(format!("/subscriptions/{}", id))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, created);
    }

    #[tokio::test]
    async fn test_delete_then_get_is_not_found() {
        let app = test_app();

        let created = body_json(
            app.clone()
                .oneshot(json_request(Method::POST, "/subscriptions", create_body()))
                .await
                .unwrap(),
        )
        .await;
        let id = created["id"].as_i64().unwrap();

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method(Method::DELETE)
                    .uri(format!("/subscriptions/{}", id))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let response = app
            .oneshot(
                Request::builder()
                    .uri(format!("/subscriptions/{}", id))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_get_unknown_id_is_404() {
        let app = test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/subscriptions/999")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_malformed_id_is_400() {
        let app = test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/subscriptions/abc")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_list_includes_created_records() {
        let app = test_app();

        app.clone()
            .oneshot(json_request(Method::POST, "/subscriptions", create_body()))
            .await
            .unwrap();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/subscriptions")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["total"], 1);
        assert_eq!(body["subscriptions"][0]["service_name"], "Yandex Plus");
    }

    #[tokio::test]
    async fn test_put_replaces_record() {
        let app = test_app();

        let created = body_json(
            app.clone()
                .oneshot(json_request(Method::POST, "/subscriptions", create_body()))
                .await
                .unwrap(),
        )
        .await;
        let id = created["id"].as_i64().unwrap();

        let mut replacement = create_body();
        replacement["price"] = json!(499);
        replacement["end_date"] = json!("12-2025");

        let response = app
            .oneshot(json_request(
                Method::PUT,
                &format!("/subscriptions/{}", id),
                replacement,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["price"], 499);
        assert_eq!(body["end_date"], "12-2025");
    }

    #[tokio::test]
    async fn test_put_unknown_id_is_404() {
        let app = test_app();

        let response = app
            .oneshot(json_request(
                Method::PUT,
                "/subscriptions/999",
                create_body(),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_patch_with_zero_price_keeps_stored_record() {
        let app = test_app();

        let created = body_json(
            app.clone()
                .oneshot(json_request(Method::POST, "/subscriptions", create_body()))
                .await
                .unwrap(),
        )
        .await;
        let id = created["id"].as_i64().unwrap();

        let response = app
            .oneshot(json_request(
                Method::PATCH,
                &format!("/subscriptions/{}", id),
                json!({ "price": 0 }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        // Zero price reads as "omitted"; the stored record wins.
        assert_eq!(body_json(response).await, created);
    }

    #[tokio::test]
    async fn test_patch_updates_only_sent_fields() {
        let app = test_app();

        let created = body_json(
            app.clone()
                .oneshot(json_request(Method::POST, "/subscriptions", create_body()))
                .await
                .unwrap(),
        )
        .await;
        let id = created["id"].as_i64().unwrap();

        let response = app
            .oneshot(json_request(
                Method::PATCH,
                &format!("/subscriptions/{}", id),
                json!({ "price": 499 }),
            ))
            .await
            .unwrap();

        let body = body_json(response).await;
        assert_eq!(body["price"], 499);
        assert_eq!(body["service_name"], "Yandex Plus");
        assert_eq!(body["start_date"], "07-2025");
    }

    #[tokio::test]
    async fn test_cost_sums_matching_records() {
        let app = test_app();
        let user = "60601fee-2bf1-4721-ae6f-7636e79a0cba";

        for (service, price) in [("Yandex Plus", 399), ("Netflix", 500)] {
            app.clone()
                .oneshot(json_request(
                    Method::POST,
                    "/subscriptions",
                    json!({
                        "service_name": service,
                        "price": price,
                        "user_id": user,
                        "start_date": "07-2025"
                    }),
                ))
                .await
                .unwrap();
        }

        let response = app
            .oneshot(json_request(
                Method::POST,
                "/subscriptions/cost",
                json!({ "user_id": user }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!({ "cost": 899 }));
    }

    #[tokio::test]
    async fn test_cost_with_no_matches_is_zero() {
        let app = test_app();

        let response = app
            .oneshot(json_request(Method::POST, "/subscriptions/cost", json!({})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!({ "cost": 0 }));
    }

    #[tokio::test]
    async fn test_missing_content_type_is_415() {
        let app = test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri("/subscriptions")
                    .body(Body::from(create_body().to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    }

    #[tokio::test]
    async fn test_malformed_body_is_400() {
        let app = test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri("/subscriptions")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from("{not json"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_malformed_date_is_400() {
        let app = test_app();

        let mut body = create_body();
        body["start_date"] = json!("2025/07");

        let response = app
            .oneshot(json_request(Method::POST, "/subscriptions", body))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_malformed_user_id_is_400() {
        let app = test_app();

        let mut body = create_body();
        body["user_id"] = json!("not-a-uuid");

        let response = app
            .oneshot(json_request(Method::POST, "/subscriptions", body))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
