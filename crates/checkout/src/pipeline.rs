use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use tracing::Instrument;

use storefront_catalog::{CatalogItem, ItemLookup, LookupError};
use storefront_core::{DiscountPercent, ItemId};

use crate::logger::{CheckoutEvent, OutcomeLogger, TracingLogger};
use crate::outcome::CheckoutOutcome;
use crate::stage::{CheckoutStage, apply_discount, check_availability};

/// Pipeline settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CheckoutConfig {
    /// Used by [`CheckoutPipeline::run_default`].
    pub default_discount: DiscountPercent,

    /// Upper bound on the fetch stage. `None` waits for the lookup as long as
    /// it takes.
    pub lookup_timeout: Option<Duration>,
}

/// Fetch → availability → price, short-circuiting at the first terminal result.
///
/// Holds no per-run state: clones share the lookup and logger, and concurrent
/// runs are independent of each other.
#[derive(Clone)]
pub struct CheckoutPipeline {
    lookup: Arc<dyn ItemLookup>,
    logger: Arc<dyn OutcomeLogger>,
    config: CheckoutConfig,
}

impl core::fmt::Debug for CheckoutPipeline {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CheckoutPipeline")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl CheckoutPipeline {
    pub fn new(lookup: Arc<dyn ItemLookup>) -> Self {
        Self {
            lookup,
            logger: Arc::new(TracingLogger),
            config: CheckoutConfig::default(),
        }
    }

    pub fn with_logger(mut self, logger: Arc<dyn OutcomeLogger>) -> Self {
        self.logger = logger;
        self
    }

    pub fn with_config(mut self, config: CheckoutConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &CheckoutConfig {
        &self.config
    }

    /// Run one checkout. Never fails; the business result is the variant.
    pub async fn run(&self, id: ItemId, discount: DiscountPercent) -> CheckoutOutcome {
        let span = tracing::info_span!(
            "checkout",
            item_id = %id,
            %discount,
            stage = CheckoutStage::INITIAL.as_str(),
        );
        self.run_stages(id, discount).instrument(span).await
    }

    /// Run one checkout with the configured default discount.
    pub async fn run_default(&self, id: ItemId) -> CheckoutOutcome {
        self.run(id, self.config.default_discount).await
    }

    /// Run one checkout per id concurrently.
    ///
    /// Every result is paired with the id it was issued for, in input order.
    /// Duplicate ids are run (and logged) independently.
    pub async fn run_batch(
        &self,
        ids: impl IntoIterator<Item = ItemId>,
        discount: DiscountPercent,
    ) -> Vec<(ItemId, CheckoutOutcome)> {
        let runs = ids
            .into_iter()
            .map(|id| async move { (id, self.run(id, discount).await) });
        join_all(runs).await
    }

    async fn run_stages(&self, id: ItemId, discount: DiscountPercent) -> CheckoutOutcome {
        let mut stage = CheckoutStage::INITIAL;

        let item = match self.fetch(id).await {
            Ok(item) => item,
            Err(error) => {
                self.logger.log(&CheckoutEvent::LookupFailed { id, error: &error });
                advance(&mut stage, CheckoutStage::Done);
                return CheckoutOutcome::NotFound { id };
            }
        };
        advance(&mut stage, CheckoutStage::Checking);

        if !check_availability(&item).await {
            self.logger.log(&CheckoutEvent::OutOfStock { item: &item });
            advance(&mut stage, CheckoutStage::Done);
            return CheckoutOutcome::OutOfStock {
                title: item.title().to_string(),
            };
        }
        advance(&mut stage, CheckoutStage::Pricing);

        let discounted = apply_discount(item.price(), discount).await;
        self.logger.log(&CheckoutEvent::Ready {
            item: &item,
            discount,
            discounted,
        });
        advance(&mut stage, CheckoutStage::Done);

        CheckoutOutcome::Ready {
            title: item.title().to_string(),
            original: item.price(),
            discounted,
        }
    }

    /// Stage 1. A timeout is reported like any other lookup failure.
    async fn fetch(&self, id: ItemId) -> Result<CatalogItem, LookupError> {
        match self.config.lookup_timeout {
            Some(limit) => tokio::time::timeout(limit, self.lookup.fetch(id))
                .await
                .unwrap_or(Err(LookupError::Timeout(limit))),
            None => self.lookup.fetch(id).await,
        }
    }
}

fn advance(stage: &mut CheckoutStage, next: CheckoutStage) {
    debug_assert!(
        stage.can_transition_to(next),
        "illegal checkout transition {stage} -> {next}"
    );
    tracing::Span::current().record("stage", next.as_str());
    tracing::trace!(from = %stage, to = %next, "checkout stage");
    *stage = next;
}
