//! Catalog module: the items a checkout operates on and the ways to look them up.
//!
//! Domain types here are pure; the only IO lives behind the [`ItemLookup`]
//! capability (`InMemoryCatalog` for tests/dev, `HttpCatalog` for a
//! fake-store-compatible HTTP backend).

pub mod analytics;
pub mod http;
pub mod item;
pub mod lookup;
pub mod memory;
pub mod patch;
pub mod sort;

pub use analytics::{AnalyticsAction, AnalyticsEvent, track};
pub use http::HttpCatalog;
pub use item::{CatalogItem, ProductRecord, RatingRecord};
pub use lookup::{ItemLookup, LookupError};
pub use memory::InMemoryCatalog;
pub use patch::ItemPatch;
pub use sort::{SortKey, SortOrder, cheapest, sort_items};
