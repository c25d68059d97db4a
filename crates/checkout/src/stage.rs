//! Pipeline stages and the forward-only stage machine.

use storefront_catalog::CatalogItem;
use storefront_core::{DiscountPercent, Price};

/// Where a checkout run currently is.
///
/// `Fetching -> Checking -> Pricing -> Done`, with short-circuit edges
/// `Fetching -> Done` and `Checking -> Done`. Nothing ever moves backwards.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum CheckoutStage {
    Fetching,
    Checking,
    Pricing,
    Done,
}

impl CheckoutStage {
    pub const INITIAL: CheckoutStage = CheckoutStage::Fetching;

    pub fn as_str(&self) -> &'static str {
        match self {
            CheckoutStage::Fetching => "fetching",
            CheckoutStage::Checking => "checking",
            CheckoutStage::Pricing => "pricing",
            CheckoutStage::Done => "done",
        }
    }

    pub fn is_terminal(&self) -> bool {
        *self == CheckoutStage::Done
    }

    pub fn can_transition_to(&self, next: CheckoutStage) -> bool {
        use CheckoutStage::*;
        matches!(
            (self, next),
            (Fetching, Checking)
                | (Fetching, Done)
                | (Checking, Pricing)
                | (Checking, Done)
                | (Pricing, Done)
        )
    }
}

impl core::fmt::Display for CheckoutStage {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stage 2: an item is available iff its count is positive.
pub async fn check_availability(item: &CatalogItem) -> bool {
    item.is_in_stock()
}

/// Stage 3: `round2(price * (1 - percent / 100))`, half away from zero.
pub async fn apply_discount(price: Price, discount: DiscountPercent) -> Price {
    price.discounted(discount)
}
