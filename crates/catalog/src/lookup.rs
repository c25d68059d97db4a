use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use storefront_core::ItemId;

use crate::item::CatalogItem;

/// Why a lookup could not produce an item.
///
/// Callers that only care about "got it or not" (the checkout pipeline) treat
/// every variant the same way.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LookupError {
    #[error("item {0} not found")]
    NotFound(ItemId),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("could not decode item: {0}")]
    Decode(String),

    #[error("lookup timed out after {0:?}")]
    Timeout(Duration),
}

/// Source of catalog items.
///
/// Implementations may be backed by a network call, a file, or an in-memory
/// table. Every call returns a fresh snapshot; nothing is cached here.
#[async_trait]
pub trait ItemLookup: Send + Sync {
    /// Fetch a single item by identifier.
    async fn fetch(&self, id: ItemId) -> Result<CatalogItem, LookupError>;

    /// Fetch the whole catalog.
    async fn list(&self) -> Result<Vec<CatalogItem>, LookupError>;
}

#[async_trait]
impl<T> ItemLookup for Arc<T>
where
    T: ItemLookup + ?Sized,
{
    async fn fetch(&self, id: ItemId) -> Result<CatalogItem, LookupError> {
        (**self).fetch(id).await
    }

    async fn list(&self) -> Result<Vec<CatalogItem>, LookupError> {
        (**self).list().await
    }
}
