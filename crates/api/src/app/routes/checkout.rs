use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path, Query, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};

use storefront_catalog::{AnalyticsEvent, track};
use storefront_checkout::CheckoutOutcome;
use storefront_core::ItemId;

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/batch", post(checkout_batch))
        .route("/:id", get(checkout_one))
}

fn track_ready(id: ItemId, outcome: &CheckoutOutcome) {
    if outcome.is_ready() {
        track(&AnalyticsEvent::purchase(id));
    }
}

/// Always 200 once the input is valid: the business result is the outcome.
pub async fn checkout_one(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Query(query): Query<dto::CheckoutQuery>,
) -> axum::response::Response {
    let id: ItemId = match id.parse() {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(e),
    };
    let discount = match query.discount() {
        Ok(d) => d.unwrap_or(services.pipeline().config().default_discount),
        Err(e) => return errors::domain_error_to_response(e),
    };

    let outcome = services.pipeline().run(id, discount).await;
    track_ready(id, &outcome);

    (
        StatusCode::OK,
        Json(dto::CheckoutResponse {
            id,
            discount,
            outcome,
        }),
    )
        .into_response()
}

pub async fn checkout_batch(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<dto::BatchCheckoutRequest>, JsonRejection>,
) -> axum::response::Response {
    let Json(body) = match body {
        Ok(body) => body,
        Err(rejection) => return errors::json_rejection_to_response(rejection),
    };
    let (ids, discount) = match body.validate() {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(e),
    };
    let discount = discount.unwrap_or(services.pipeline().config().default_discount);

    let results = services.pipeline().run_batch(ids, discount).await;
    tracing::info!(count = results.len(), "batch checkout finished");

    let results = results
        .into_iter()
        .map(|(id, outcome)| {
            track_ready(id, &outcome);
            dto::BatchCheckoutEntry { id, outcome }
        })
        .collect();

    (
        StatusCode::OK,
        Json(dto::BatchCheckoutResponse { discount, results }),
    )
        .into_response()
}
