use axum::Router;

pub mod checkout;
pub mod products;
pub mod system;

/// Router for all catalog and checkout endpoints.
pub fn router() -> Router {
    Router::new()
        .nest("/products", products::router())
        .nest("/checkout", checkout::router())
}
