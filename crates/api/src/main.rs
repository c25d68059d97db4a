use std::sync::Arc;

use anyhow::Context;

use storefront_api::app::{AppServices, build_app};
use storefront_api::config::ApiConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    storefront_observability::init();

    let config = ApiConfig::from_env().context("invalid configuration")?;
    tracing::info!(
        default_discount = %config.checkout.default_discount,
        lookup_timeout_ms = config.lookup_timeout_ms(),
        "configuration loaded"
    );

    let services = Arc::new(AppServices::from_config(&config));
    let app = build_app(services);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
