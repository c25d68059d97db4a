use serde::{Deserialize, Serialize};

use storefront_catalog::{SortKey, SortOrder};
use storefront_checkout::CheckoutOutcome;
use storefront_core::{DiscountPercent, DomainError, ItemId};

/// Upper bound on ids per batch checkout request.
pub const MAX_BATCH_SIZE: usize = 100;

// -------------------------
// Request DTOs
// -------------------------

/// Query string values are kept as text so bad input gets our own 400 body.
#[derive(Debug, Default, Deserialize)]
pub struct ProductListQuery {
    pub sort: Option<String>,
    pub order: Option<String>,
}

impl ProductListQuery {
    pub fn parse(&self) -> Result<(SortKey, SortOrder), DomainError> {
        let key = match &self.sort {
            Some(s) => s.parse::<SortKey>()?,
            None => SortKey::default(),
        };
        let order = match &self.order {
            Some(s) => s.parse::<SortOrder>()?,
            None => SortOrder::default(),
        };
        Ok((key, order))
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct CheckoutQuery {
    pub discount: Option<String>,
}

impl CheckoutQuery {
    /// `None` means "use the configured default".
    pub fn discount(&self) -> Result<Option<DiscountPercent>, DomainError> {
        self.discount.as_deref().map(str::parse::<DiscountPercent>).transpose()
    }
}

#[derive(Debug, Deserialize)]
pub struct BatchCheckoutRequest {
    pub ids: Vec<u64>,
    pub discount: Option<f64>,
}

impl BatchCheckoutRequest {
    pub fn validate(&self) -> Result<(Vec<ItemId>, Option<DiscountPercent>), DomainError> {
        if self.ids.len() > MAX_BATCH_SIZE {
            return Err(DomainError::validation(format!(
                "at most {MAX_BATCH_SIZE} ids per batch (got {})",
                self.ids.len()
            )));
        }
        let discount = self.discount.map(DiscountPercent::new).transpose()?;
        let ids = self.ids.iter().copied().map(ItemId::new).collect();
        Ok((ids, discount))
    }
}

// -------------------------
// Response DTOs
// -------------------------

#[derive(Debug, Serialize)]
pub struct CheckoutResponse {
    pub id: ItemId,
    pub discount: DiscountPercent,
    pub outcome: CheckoutOutcome,
}

#[derive(Debug, Serialize)]
pub struct BatchCheckoutResponse {
    pub discount: DiscountPercent,
    pub results: Vec<BatchCheckoutEntry>,
}

#[derive(Debug, Serialize)]
pub struct BatchCheckoutEntry {
    pub id: ItemId,
    pub outcome: CheckoutOutcome,
}
