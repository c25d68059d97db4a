use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path, Query, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};

use storefront_catalog::{AnalyticsEvent, ItemPatch, cheapest, sort_items, track};
use storefront_core::ItemId;

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_products))
        .route("/cheapest", get(cheapest_product))
        .route("/:id", get(get_product).patch(patch_product))
}

fn parse_id(id: &str) -> Result<ItemId, axum::response::Response> {
    id.parse::<ItemId>().map_err(errors::domain_error_to_response)
}

pub async fn list_products(
    Extension(services): Extension<Arc<AppServices>>,
    Query(query): Query<dto::ProductListQuery>,
) -> axum::response::Response {
    let (key, order) = match query.parse() {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(e),
    };

    let items = match services.lookup().list().await {
        Ok(items) => items,
        Err(e) => return errors::lookup_error_to_response(e),
    };

    (StatusCode::OK, Json(sort_items(&items, key, order))).into_response()
}

pub async fn cheapest_product(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    let items = match services.lookup().list().await {
        Ok(items) => items,
        Err(e) => return errors::lookup_error_to_response(e),
    };

    match cheapest(&items) {
        Some(item) => (StatusCode::OK, Json(item.clone())).into_response(),
        None => errors::json_error(StatusCode::NOT_FOUND, "not_found", "catalog is empty"),
    }
}

pub async fn get_product(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    match services.lookup().fetch(id).await {
        Ok(item) => {
            track(&AnalyticsEvent::view(id));
            (StatusCode::OK, Json(item)).into_response()
        }
        Err(e) => errors::lookup_error_to_response(e),
    }
}

pub async fn patch_product(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    patch: Result<Json<ItemPatch>, JsonRejection>,
) -> axum::response::Response {
    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    let Json(patch) = match patch {
        Ok(patch) => patch,
        Err(rejection) => return errors::json_rejection_to_response(rejection),
    };

    let Some(catalog) = services.editable_catalog() else {
        return errors::json_error(
            StatusCode::METHOD_NOT_ALLOWED,
            "read_only_catalog",
            "the configured catalog does not accept updates",
        );
    };

    match catalog.patch(id, &patch) {
        Ok(Some(item)) => (StatusCode::OK, Json(item)).into_response(),
        Ok(None) => errors::json_error(
            StatusCode::NOT_FOUND,
            "not_found",
            format!("product {id} not found"),
        ),
        Err(e) => errors::domain_error_to_response(e),
    }
}
