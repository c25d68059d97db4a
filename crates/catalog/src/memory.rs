use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use storefront_core::{DomainError, ItemId};

use crate::item::CatalogItem;
use crate::lookup::{ItemLookup, LookupError};
use crate::patch::ItemPatch;

/// In-memory catalog keyed by item id.
///
/// Intended for tests/dev. `list()` returns items in id order.
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    items: RwLock<BTreeMap<ItemId, CatalogItem>>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_items(items: impl IntoIterator<Item = CatalogItem>) -> Self {
        let catalog = Self::new();
        for item in items {
            catalog.insert(item);
        }
        catalog
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// Insert or replace an item; returns the previous value, if any.
    pub fn insert(&self, item: CatalogItem) -> Option<CatalogItem> {
        let mut items = self.items.write().unwrap_or_else(|e| e.into_inner());
        items.insert(item.item_id(), item)
    }

    pub fn remove(&self, id: ItemId) -> Option<CatalogItem> {
        let mut items = self.items.write().unwrap_or_else(|e| e.into_inner());
        items.remove(&id)
    }

    pub fn len(&self) -> usize {
        self.items.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Apply a partial update to a stored item.
    ///
    /// Returns `Ok(None)` when the item does not exist. The stored item is
    /// only replaced when the patch validates.
    pub fn patch(&self, id: ItemId, patch: &ItemPatch) -> Result<Option<CatalogItem>, DomainError> {
        let mut items = self.items.write().unwrap_or_else(|e| e.into_inner());
        let Some(current) = items.get(&id) else {
            return Ok(None);
        };

        let updated = patch.apply(current)?;
        items.insert(id, updated.clone());
        tracing::debug!(item_id = %id, "catalog item patched");
        Ok(Some(updated))
    }
}

#[async_trait]
impl ItemLookup for InMemoryCatalog {
    async fn fetch(&self, id: ItemId) -> Result<CatalogItem, LookupError> {
        let items = self
            .items
            .read()
            .map_err(|_| LookupError::Transport("lock poisoned".to_string()))?;
        items.get(&id).cloned().ok_or(LookupError::NotFound(id))
    }

    async fn list(&self) -> Result<Vec<CatalogItem>, LookupError> {
        let items = self
            .items
            .read()
            .map_err(|_| LookupError::Transport("lock poisoned".to_string()))?;
        Ok(items.values().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_core::Price;

    fn item(id: u64, title: &str, cents: u64, count: u64) -> CatalogItem {
        CatalogItem::new(ItemId::new(id), title, Price::from_cents(cents), count)
    }

    #[tokio::test]
    async fn fetch_returns_a_copy_of_the_stored_item() {
        let catalog = InMemoryCatalog::with_items([item(1, "Backpack", 10995, 230)]);
        let fetched = catalog.fetch(ItemId::new(1)).await.unwrap();
        assert_eq!(fetched.title(), "Backpack");
        assert_eq!(fetched.availability(), 230);
    }

    #[tokio::test]
    async fn fetch_missing_item_is_not_found() {
        let catalog = InMemoryCatalog::new();
        let err = catalog.fetch(ItemId::new(9999)).await.unwrap_err();
        assert_eq!(err, LookupError::NotFound(ItemId::new(9999)));
    }

    #[tokio::test]
    async fn list_is_ordered_by_id() {
        let catalog = InMemoryCatalog::with_items([
            item(3, "C", 300, 1),
            item(1, "A", 100, 1),
            item(2, "B", 200, 1),
        ]);
        let ids: Vec<u64> = catalog
            .list()
            .await
            .unwrap()
            .iter()
            .map(|i| i.item_id().get())
            .collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn insert_replaces_and_remove_deletes() {
        let catalog = InMemoryCatalog::new();
        assert!(catalog.insert(item(1, "A", 100, 1)).is_none());
        let previous = catalog.insert(item(1, "A2", 100, 1)).unwrap();
        assert_eq!(previous.title(), "A");
        assert_eq!(catalog.len(), 1);
        assert!(catalog.remove(ItemId::new(1)).is_some());
        assert!(catalog.is_empty());
    }

    #[test]
    fn patch_updates_existing_item_only() {
        let catalog = InMemoryCatalog::with_items([item(1, "A", 100, 1)]);
        let patch = ItemPatch {
            title: Some("New title (patch demo)".to_string()),
            ..ItemPatch::default()
        };

        let updated = catalog.patch(ItemId::new(1), &patch).unwrap().unwrap();
        assert_eq!(updated.title(), "New title (patch demo)");
        assert!(catalog.patch(ItemId::new(2), &patch).unwrap().is_none());
    }

    #[test]
    fn rejected_patch_leaves_item_untouched() {
        let catalog = InMemoryCatalog::with_items([item(1, "A", 100, 1)]);
        let patch = ItemPatch {
            title: Some("   ".to_string()),
            ..ItemPatch::default()
        };

        assert!(catalog.patch(ItemId::new(1), &patch).is_err());
        let items = catalog.items.read().unwrap();
        assert_eq!(items[&ItemId::new(1)].title(), "A");
    }

    #[test]
    fn poisoned_lock_still_reports_contents() {
        let catalog = InMemoryCatalog::with_items([item(1, "A", 100, 1)]).arc();

        let writer = catalog.clone();
        let _ = std::thread::spawn(move || {
            let _guard = writer.items.write().unwrap();
            panic!("writer died holding the lock");
        })
        .join();

        assert!(catalog.items.is_poisoned());
        assert_eq!(catalog.len(), 1);
        assert!(!catalog.is_empty());
    }
}
