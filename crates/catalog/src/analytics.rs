//! Product analytics events (`product:<id>:<action>`).
//!
//! Events are emitted as `tracing` events on the `analytics` target; no
//! collector is bundled.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use storefront_core::ItemId;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AnalyticsAction {
    View,
    AddToCart,
    Purchase,
}

impl AnalyticsAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnalyticsAction::View => "view",
            AnalyticsAction::AddToCart => "add-to-cart",
            AnalyticsAction::Purchase => "purchase",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyticsEvent {
    pub item_id: ItemId,
    pub action: AnalyticsAction,
    pub occurred_at: DateTime<Utc>,
}

impl AnalyticsEvent {
    pub fn new(item_id: ItemId, action: AnalyticsAction, occurred_at: DateTime<Utc>) -> Self {
        Self {
            item_id,
            action,
            occurred_at,
        }
    }

    pub fn view(item_id: ItemId) -> Self {
        Self::new(item_id, AnalyticsAction::View, Utc::now())
    }

    pub fn add_to_cart(item_id: ItemId) -> Self {
        Self::new(item_id, AnalyticsAction::AddToCart, Utc::now())
    }

    pub fn purchase(item_id: ItemId) -> Self {
        Self::new(item_id, AnalyticsAction::Purchase, Utc::now())
    }

    /// Event name, e.g. `product:1:view`.
    pub fn name(&self) -> String {
        format!("product:{}:{}", self.item_id, self.action.as_str())
    }
}

impl core::fmt::Display for AnalyticsEvent {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.name())
    }
}

pub fn track(event: &AnalyticsEvent) {
    tracing::info!(
        target: "analytics",
        event = %event.name(),
        item_id = %event.item_id,
        occurred_at = %event.occurred_at.to_rfc3339(),
        "track event"
    );
}
