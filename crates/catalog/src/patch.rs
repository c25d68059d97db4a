use serde::{Deserialize, Serialize};

use storefront_core::{DomainError, DomainResult, Price};

use crate::item::CatalogItem;

/// Partial update of a catalog item: every field is optional.
///
/// `price` goes through [`Price`] deserialization, so a negative price is
/// rejected before the patch ever reaches [`ItemPatch::apply`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ItemPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Price>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub availability: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating_rate: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl ItemPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Produce the patched item. The identifier never changes.
    pub fn apply(&self, item: &CatalogItem) -> DomainResult<CatalogItem> {
        if let Some(title) = &self.title {
            if title.trim().is_empty() {
                return Err(DomainError::validation("title cannot be empty"));
            }
        }
        if let Some(rate) = self.rating_rate {
            if !rate.is_finite() || rate < 0.0 {
                return Err(DomainError::validation(format!(
                    "rating rate must be a non-negative number (got {rate})"
                )));
            }
        }

        let mut patched = CatalogItem::new(
            item.item_id(),
            self.title.as_deref().unwrap_or(item.title()),
            self.price.unwrap_or(item.price()),
            self.availability.unwrap_or(item.availability()),
        )
        .with_rating_rate(self.rating_rate.unwrap_or(item.rating_rate()))
        .with_category(self.category.as_deref().unwrap_or(item.category()))
        .with_description(self.description.as_deref().unwrap_or(item.description()));

        if let Some(image) = self.image.as_deref().or(item.image()) {
            patched = patched.with_image(image);
        }
        Ok(patched)
    }
}
