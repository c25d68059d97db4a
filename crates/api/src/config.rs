//! Process configuration, read from environment variables.

use std::net::SocketAddr;
use std::time::Duration;

use thiserror::Error;

use storefront_catalog::HttpCatalog;
use storefront_checkout::CheckoutConfig;
use storefront_core::{DiscountPercent, DomainError};

pub const BIND_ENV: &str = "STOREFRONT_BIND";
pub const CATALOG_ENV: &str = "STOREFRONT_CATALOG";
pub const CATALOG_URL_ENV: &str = "STOREFRONT_CATALOG_URL";
pub const DEFAULT_DISCOUNT_ENV: &str = "STOREFRONT_DEFAULT_DISCOUNT";
pub const LOOKUP_TIMEOUT_ENV: &str = "STOREFRONT_LOOKUP_TIMEOUT_MS";

const DEFAULT_BIND: &str = "0.0.0.0:8080";

/// Where catalog items come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    /// Fake-store compatible HTTP API.
    Http { base_url: String },
    /// Seeded in-memory catalog (dev/demo; supports PATCH).
    InMemory,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub bind_addr: SocketAddr,
    pub catalog: CatalogSource,
    pub checkout: CheckoutConfig,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var}: invalid socket address {value:?}")]
    InvalidBindAddr { var: &'static str, value: String },

    #[error("{var}: unknown catalog source {value:?} (expected http or memory)")]
    UnknownCatalog { var: &'static str, value: String },

    #[error("{var}: {source}")]
    InvalidDiscount {
        var: &'static str,
        #[source]
        source: DomainError,
    },

    #[error("{var}: expected a whole number of milliseconds, got {value:?}")]
    InvalidTimeout { var: &'static str, value: String },
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            catalog: CatalogSource::Http {
                base_url: HttpCatalog::DEFAULT_BASE_URL.to_string(),
            },
            checkout: CheckoutConfig::default(),
        }
    }
}

impl ApiConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary variable source. Unset and blank
    /// variables take their defaults.
    pub fn from_vars(get: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |key: &str| get(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let bind = var(BIND_ENV).unwrap_or_else(|| DEFAULT_BIND.to_string());
        let bind_addr = bind.parse().map_err(|_| ConfigError::InvalidBindAddr {
            var: BIND_ENV,
            value: bind.clone(),
        })?;

        let catalog = match var(CATALOG_ENV).as_deref().map(str::to_lowercase).as_deref() {
            None | Some("http") => CatalogSource::Http {
                base_url: var(CATALOG_URL_ENV)
                    .unwrap_or_else(|| HttpCatalog::DEFAULT_BASE_URL.to_string()),
            },
            Some("memory") => CatalogSource::InMemory,
            Some(other) => {
                return Err(ConfigError::UnknownCatalog {
                    var: CATALOG_ENV,
                    value: other.to_string(),
                });
            }
        };

        let default_discount = match var(DEFAULT_DISCOUNT_ENV) {
            Some(value) => value.parse::<DiscountPercent>().map_err(|source| {
                ConfigError::InvalidDiscount {
                    var: DEFAULT_DISCOUNT_ENV,
                    source,
                }
            })?,
            None => DiscountPercent::DEFAULT,
        };

        // 0 disables the timeout.
        let lookup_timeout = match var(LOOKUP_TIMEOUT_ENV) {
            Some(value) => {
                let ms = value.parse::<u64>().map_err(|_| ConfigError::InvalidTimeout {
                    var: LOOKUP_TIMEOUT_ENV,
                    value: value.clone(),
                })?;
                (ms > 0).then(|| Duration::from_millis(ms))
            }
            None => None,
        };

        Ok(Self {
            bind_addr,
            catalog,
            checkout: CheckoutConfig {
                default_discount,
                lookup_timeout,
            },
        })
    }

    /// Lookup timeout in whole milliseconds, saturating at `u64::MAX`.
    pub fn lookup_timeout_ms(&self) -> Option<u64> {
        self.checkout
            .lookup_timeout
            .map(|t| u64::try_from(t.as_millis()).unwrap_or(u64::MAX))
    }
}
