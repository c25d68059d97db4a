//! HTTP-backed catalog (fake-store compatible API).

use async_trait::async_trait;
use reqwest::StatusCode;

use storefront_core::ItemId;

use crate::item::{CatalogItem, ProductRecord};
use crate::lookup::{ItemLookup, LookupError};

/// Client for a fake-store style product API:
/// `GET {base}/products` and `GET {base}/products/{id}`.
///
/// The upstream answers unknown ids with `200` and an empty (or `null`) body,
/// so both that and a `404` map to [`LookupError::NotFound`].
#[derive(Debug, Clone)]
pub struct HttpCatalog {
    base_url: String,
    client: reqwest::Client,
}

impl HttpCatalog {
    pub const DEFAULT_BASE_URL: &'static str = "https://fakestoreapi.com";

    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, reqwest::Client::new())
    }

    pub fn with_client(base_url: impl Into<String>, client: reqwest::Client) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, client }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn products_url(&self) -> String {
        format!("{}/products", self.base_url)
    }

    fn product_url(&self, id: ItemId) -> String {
        format!("{}/products/{}", self.base_url, id)
    }

    async fn get_body(&self, url: &str) -> Result<Option<String>, LookupError> {
        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| LookupError::Transport(e.to_string()))?;

        let status = resp.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(LookupError::Transport(format!("HTTP {}", status.as_u16())));
        }

        let body = resp
            .text()
            .await
            .map_err(|e| LookupError::Transport(e.to_string()))?;
        Ok(Some(body))
    }
}

impl Default for HttpCatalog {
    fn default() -> Self {
        Self::new(Self::DEFAULT_BASE_URL)
    }
}

/// Decode a single-product body. Empty and `null` bodies mean "no such item".
///
/// A product whose id differs from the requested one is a decode error.
pub(crate) fn decode_product(id: ItemId, body: &str) -> Result<CatalogItem, LookupError> {
    if body.trim().is_empty() {
        return Err(LookupError::NotFound(id));
    }

    let record: Option<ProductRecord> =
        serde_json::from_str(body).map_err(|e| LookupError::Decode(e.to_string()))?;
    let record = record.ok_or(LookupError::NotFound(id))?;
    if record.id != id.get() {
        return Err(LookupError::Decode(format!(
            "requested product {id}, got product {}",
            record.id
        )));
    }

    CatalogItem::try_from(record).map_err(|e| LookupError::Decode(e.to_string()))
}

pub(crate) fn decode_listing(body: &str) -> Result<Vec<CatalogItem>, LookupError> {
    let records: Vec<ProductRecord> =
        serde_json::from_str(body).map_err(|e| LookupError::Decode(e.to_string()))?;

    records
        .into_iter()
        .map(|r| CatalogItem::try_from(r).map_err(|e| LookupError::Decode(e.to_string())))
        .collect()
}

#[async_trait]
impl ItemLookup for HttpCatalog {
    async fn fetch(&self, id: ItemId) -> Result<CatalogItem, LookupError> {
        let url = self.product_url(id);
        tracing::debug!(%url, "fetching catalog item");

        match self.get_body(&url).await? {
            Some(body) => decode_product(id, &body),
            None => Err(LookupError::NotFound(id)),
        }
    }

    async fn list(&self) -> Result<Vec<CatalogItem>, LookupError> {
        let url = self.products_url();
        tracing::debug!(%url, "fetching catalog listing");

        match self.get_body(&url).await? {
            Some(body) => decode_listing(&body),
            None => Err(LookupError::Transport(format!("HTTP 404 from {url}"))),
        }
    }
}
