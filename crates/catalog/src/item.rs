use serde::{Deserialize, Serialize};

use storefront_core::{DomainError, Entity, ItemId, Price};

/// A product as the catalog knows it: the subject of a checkout.
///
/// Items are read-only snapshots; a lookup returns a fresh one every time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ProductRecord", into = "ProductRecord")]
pub struct CatalogItem {
    id: ItemId,
    title: String,
    price: Price,
    availability: u64,
    rating_rate: f64,
    category: String,
    description: String,
    image: Option<String>,
}

impl CatalogItem {
    pub fn new(id: ItemId, title: impl Into<String>, price: Price, availability: u64) -> Self {
        Self {
            id,
            title: title.into(),
            price,
            availability,
            rating_rate: 0.0,
            category: String::new(),
            description: String::new(),
            image: None,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    /// Negative or non-finite rates are stored as zero.
    pub fn with_rating_rate(mut self, rate: f64) -> Self {
        self.rating_rate = if rate.is_finite() && rate > 0.0 { rate } else { 0.0 };
        self
    }

    pub fn item_id(&self) -> ItemId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn price(&self) -> Price {
        self.price
    }

    /// Units (or popularity count) backing the in-stock check.
    pub fn availability(&self) -> u64 {
        self.availability
    }

    pub fn rating_rate(&self) -> f64 {
        self.rating_rate
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }

    pub fn is_in_stock(&self) -> bool {
        self.availability > 0
    }
}

impl Entity for CatalogItem {
    type Id = ItemId;

    fn id(&self) -> ItemId {
        self.id
    }
}

/// Wire shape of a fake-store product.
///
/// ```json
/// {"id":1,"title":"Backpack","price":109.95,"description":"...","category":"bags",
///  "image":"https://...","rating":{"rate":3.9,"count":120}}
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub id: u64,
    pub title: String,
    pub price: f64,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<RatingRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingRecord {
    #[serde(default)]
    pub rate: f64,
    pub count: u64,
}

impl TryFrom<ProductRecord> for CatalogItem {
    type Error = DomainError;

    /// A record without `rating` has nothing in stock.
    fn try_from(record: ProductRecord) -> Result<Self, Self::Error> {
        let price = Price::from_decimal(record.price)?;
        let (rate, count) = match record.rating {
            Some(r) if r.rate < 0.0 => {
                return Err(DomainError::validation(format!(
                    "rating rate cannot be negative (got {})",
                    r.rate
                )));
            }
            Some(r) => (r.rate, r.count),
            None => (0.0, 0),
        };

        let mut item = CatalogItem::new(ItemId::new(record.id), record.title, price, count)
            .with_category(record.category)
            .with_description(record.description)
            .with_rating_rate(rate);
        item.image = record.image;
        Ok(item)
    }
}

impl From<CatalogItem> for ProductRecord {
    fn from(item: CatalogItem) -> Self {
        Self {
            id: item.id.get(),
            title: item.title,
            price: item.price.as_decimal(),
            description: item.description,
            category: item.category,
            image: item.image,
            rating: Some(RatingRecord {
                rate: item.rating_rate,
                count: item.availability,
            }),
        }
    }
}
