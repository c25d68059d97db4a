//! Sorting helpers for catalog listings.

use core::cmp::Ordering;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use storefront_core::DomainError;

use crate::item::CatalogItem;

/// Field to sort a listing by.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    Id,
    Title,
    Price,
    Rating,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl FromStr for SortKey {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "id" => Ok(SortKey::Id),
            "title" => Ok(SortKey::Title),
            "price" => Ok(SortKey::Price),
            "rating" => Ok(SortKey::Rating),
            other => Err(DomainError::validation(format!(
                "sort must be one of: id, title, price, rating (got {other})"
            ))),
        }
    }
}

impl FromStr for SortOrder {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            other => Err(DomainError::validation(format!(
                "order must be one of: asc, desc (got {other})"
            ))),
        }
    }
}

fn compare(a: &CatalogItem, b: &CatalogItem, key: SortKey) -> Ordering {
    match key {
        SortKey::Id => a.item_id().cmp(&b.item_id()),
        SortKey::Title => a.title().cmp(b.title()),
        SortKey::Price => a.price().cmp(&b.price()),
        SortKey::Rating => a.rating_rate().total_cmp(&b.rating_rate()),
    }
}

/// Return a sorted copy of `items`. Stable: equal keys keep their input order
/// in both directions.
pub fn sort_items(items: &[CatalogItem], key: SortKey, order: SortOrder) -> Vec<CatalogItem> {
    let mut sorted = items.to_vec();
    sorted.sort_by(|a, b| {
        let ord = compare(a, b, key);
        match order {
            SortOrder::Asc => ord,
            SortOrder::Desc => ord.reverse(),
        }
    });
    sorted
}

/// Lowest-priced item; the first one wins on ties.
pub fn cheapest(items: &[CatalogItem]) -> Option<&CatalogItem> {
    items.iter().reduce(|best, item| {
        if item.price() < best.price() { item } else { best }
    })
}
