use serde::{Deserialize, Serialize};

use storefront_core::{ItemId, Price};

/// Terminal result of one checkout run.
///
/// Exactly one case per run. Lookup failures of any kind collapse into
/// `NotFound`: "does not exist" and "could not be retrieved" look the same
/// from here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CheckoutOutcome {
    NotFound {
        id: ItemId,
    },
    OutOfStock {
        title: String,
    },
    Ready {
        title: String,
        original: Price,
        discounted: Price,
    },
}

impl CheckoutOutcome {
    pub fn status(&self) -> &'static str {
        match self {
            CheckoutOutcome::NotFound { .. } => "not_found",
            CheckoutOutcome::OutOfStock { .. } => "out_of_stock",
            CheckoutOutcome::Ready { .. } => "ready",
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, CheckoutOutcome::Ready { .. })
    }
}

impl core::fmt::Display for CheckoutOutcome {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            CheckoutOutcome::NotFound { id } => write!(f, "product {id} not found"),
            CheckoutOutcome::OutOfStock { title } => write!(f, "{title} is out of stock"),
            CheckoutOutcome::Ready {
                title,
                original,
                discounted,
            } => write!(f, "{title}: {original} -> {discounted}"),
        }
    }
}
