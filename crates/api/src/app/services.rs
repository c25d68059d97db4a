use std::sync::Arc;

use storefront_catalog::{CatalogItem, HttpCatalog, InMemoryCatalog, ItemLookup};
use storefront_checkout::{CheckoutConfig, CheckoutPipeline};
use storefront_core::{ItemId, Price};

use crate::config::{ApiConfig, CatalogSource};

/// Shared services for all handlers.
pub struct AppServices {
    lookup: Arc<dyn ItemLookup>,
    editable: Option<Arc<InMemoryCatalog>>,
    pipeline: CheckoutPipeline,
}

impl AppServices {
    /// In-memory catalog; the only source that accepts PATCH.
    pub fn in_memory(catalog: Arc<InMemoryCatalog>, config: CheckoutConfig) -> Self {
        let lookup: Arc<dyn ItemLookup> = catalog.clone();
        Self {
            pipeline: CheckoutPipeline::new(lookup.clone()).with_config(config),
            lookup,
            editable: Some(catalog),
        }
    }

    pub fn http(catalog: HttpCatalog, config: CheckoutConfig) -> Self {
        let lookup: Arc<dyn ItemLookup> = Arc::new(catalog);
        Self {
            pipeline: CheckoutPipeline::new(lookup.clone()).with_config(config),
            lookup,
            editable: None,
        }
    }

    pub fn from_config(config: &ApiConfig) -> Self {
        match &config.catalog {
            CatalogSource::Http { base_url } => {
                tracing::info!(%base_url, "using HTTP catalog");
                Self::http(HttpCatalog::new(base_url.clone()), config.checkout)
            }
            CatalogSource::InMemory => {
                tracing::info!("using seeded in-memory catalog");
                Self::in_memory(Arc::new(demo_catalog()), config.checkout)
            }
        }
    }

    pub fn lookup(&self) -> &Arc<dyn ItemLookup> {
        &self.lookup
    }

    pub fn pipeline(&self) -> &CheckoutPipeline {
        &self.pipeline
    }

    pub fn editable_catalog(&self) -> Option<&InMemoryCatalog> {
        self.editable.as_deref()
    }
}

/// Small fixed catalog for local runs.
pub fn demo_catalog() -> InMemoryCatalog {
    let item = |id: u64, title: &str, cents: u64, count: u64, rate: f64, category: &str| {
        CatalogItem::new(ItemId::new(id), title, Price::from_cents(cents), count)
            .with_rating_rate(rate)
            .with_category(category)
    };

    InMemoryCatalog::with_items([
        item(1, "Backpack", 10995, 230, 3.9, "men's clothing"),
        item(2, "Mens Casual Premium Slim Fit T-Shirts", 2230, 259, 4.1, "men's clothing"),
        item(3, "Mens Cotton Jacket", 5599, 500, 4.7, "men's clothing"),
        item(4, "Solid Gold Petite Micropave", 16800, 70, 3.9, "jewelery"),
        item(42, "Ghost Item", 1000, 0, 0.0, "misc"),
    ])
}
