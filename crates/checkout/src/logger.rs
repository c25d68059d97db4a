//! Side channel for human-readable checkout reporting.

use std::sync::Mutex;

use storefront_catalog::{CatalogItem, LookupError};
use storefront_core::{DiscountPercent, ItemId, Price};

/// Something worth reporting at a pipeline exit point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CheckoutEvent<'a> {
    LookupFailed {
        id: ItemId,
        error: &'a LookupError,
    },
    OutOfStock {
        item: &'a CatalogItem,
    },
    Ready {
        item: &'a CatalogItem,
        discount: DiscountPercent,
        discounted: Price,
    },
}

impl core::fmt::Display for CheckoutEvent<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            CheckoutEvent::LookupFailed { id, error } => {
                write!(f, "Product {id} not found ({error})")
            }
            CheckoutEvent::OutOfStock { item } => {
                write!(f, "{} is out of stock", item.title())
            }
            CheckoutEvent::Ready {
                item,
                discount,
                discounted,
            } => write!(
                f,
                "{} ready for checkout: original {}, discounted {} ({} off), rating {}",
                item.title(),
                item.price(),
                discounted,
                discount,
                item.rating_rate()
            ),
        }
    }
}

/// Receives one event per checkout run.
///
/// `log` has no error channel: whatever happens in here cannot change the
/// outcome of the run.
pub trait OutcomeLogger: Send + Sync {
    fn log(&self, event: &CheckoutEvent<'_>);
}

/// Reports events through `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLogger;

impl OutcomeLogger for TracingLogger {
    fn log(&self, event: &CheckoutEvent<'_>) {
        match event {
            CheckoutEvent::LookupFailed { id, error } => {
                tracing::warn!(item_id = %id, %error, "{event}");
            }
            CheckoutEvent::OutOfStock { item } => {
                tracing::info!(item_id = %item.item_id(), "{event}");
            }
            CheckoutEvent::Ready {
                item, discounted, ..
            } => {
                tracing::info!(
                    item_id = %item.item_id(),
                    original = %item.price(),
                    discounted = %discounted,
                    "{event}"
                );
            }
        }
    }
}

/// Keeps rendered lines in memory. Intended for tests/dev.
#[derive(Debug, Default)]
pub struct MemoryLogger {
    lines: Mutex<Vec<String>>,
}

impl MemoryLogger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines
            .lock()
            .map(|lines| lines.clone())
            .unwrap_or_else(|e| e.into_inner().clone())
    }
}

impl OutcomeLogger for MemoryLogger {
    fn log(&self, event: &CheckoutEvent<'_>) {
        // A poisoned lock still holds usable data; keep recording.
        let mut lines = self.lines.lock().unwrap_or_else(|e| e.into_inner());
        lines.push(event.to_string());
    }
}
