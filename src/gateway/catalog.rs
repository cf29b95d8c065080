//! Catalog gateway to the dropshipping supplier.
//!
//! Read-path failures never reach the caller: with no credential, or on any
//! transport or status failure, the gateway downgrades to the bundled demo
//! catalog and flags the page with `is_demo`. Live responses pass the
//! upstream pagination metadata through unchanged.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::SupplierConfig;
use crate::domain::product::Product;
use crate::gateway::demo;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CatalogPage {
    pub count: u64,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<Product>,
    pub is_demo: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Upstream listing body; same pagination envelope as [`CatalogPage`]
/// without the local demo markers.
#[derive(Debug, Deserialize)]
struct SupplierListing {
    count: u64,
    next: Option<String>,
    previous: Option<String>,
    results: Vec<Product>,
}

#[derive(Debug, Error)]
enum CatalogFetchError {
    #[error("supplier returned status {0}")]
    Status(u16),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

#[derive(Clone)]
pub struct CatalogGateway {
    http: reqwest::Client,
    config: SupplierConfig,
}

impl CatalogGateway {
    pub fn new(config: SupplierConfig) -> Self {
        Self { http: reqwest::Client::new(), config }
    }

    /// List products for the shop grid. Never fails; the worst case is a
    /// demo page carrying an explanatory message.
    pub async fn list_products(&self, page: u32, page_size: u32, category: Option<&str>) -> CatalogPage {
        let Some(token) = self.config.api_token.clone() else {
            tracing::warn!("no supplier credential configured, serving demo catalog");
            return demo::demo_page(page, page_size, category, None);
        };
        match self.fetch_listing(&token, page, page_size, category).await {
            Ok(listing) => listing,
            Err(e) => {
                tracing::warn!(error = %e, "supplier listing failed, serving demo catalog");
                demo::demo_page(page, page_size, category, Some(e.to_string()))
            }
        }
    }

    async fn fetch_listing(
        &self,
        token: &str,
        page: u32,
        page_size: u32,
        category: Option<&str>,
    ) -> Result<CatalogPage, CatalogFetchError> {
        let mut req = self
            .http
            .get(self.config.endpoint("products"))
            .bearer_auth(token)
            .query(&[("page", page.to_string()), ("page_size", page_size.to_string())]);
        if let Some(category) = category {
            req = req.query(&[("category", category)]);
        }
        let resp = req.send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(CatalogFetchError::Status(status.as_u16()));
        }
        let listing: SupplierListing = resp.json().await?;
        Ok(CatalogPage {
            count: listing.count,
            next: listing.next,
            previous: listing.previous,
            results: listing.results,
            is_demo: false,
            error: None,
        })
    }

    /// Product detail. Falls back to the demo set by id, so a detail page
    /// keeps working in demo mode.
    pub async fn get_product(&self, id: &str) -> Option<Product> {
        let Some(token) = self.config.api_token.clone() else {
            return demo::demo_catalog().into_iter().find(|p| p.id == id);
        };
        match self.fetch_product(&token, id).await {
            Ok(product) => Some(product),
            Err(e) => {
                tracing::warn!(error = %e, id, "supplier product lookup failed, trying demo catalog");
                demo::demo_catalog().into_iter().find(|p| p.id == id)
            }
        }
    }

    async fn fetch_product(&self, token: &str, id: &str) -> Result<Product, CatalogFetchError> {
        let resp = self
            .http
            .get(self.config.endpoint(&format!("products/{id}")))
            .bearer_auth(token)
            .send()
            .await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(CatalogFetchError::Status(status.as_u16()));
        }
        Ok(resp.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_no_credential_serves_demo_catalog() {
        let gw = CatalogGateway::new(SupplierConfig::demo());
        let page = gw.list_products(1, 20, None).await;
        assert!(page.is_demo);
        assert!(page.error.is_none());
        assert_eq!(page.count, 10);
        assert!(!page.results.is_empty());
    }

    #[tokio::test]
    async fn test_demo_listing_honors_category_and_paging() {
        let gw = CatalogGateway::new(SupplierConfig::demo());
        let page = gw.list_products(1, 2, Some("eyes")).await;
        assert!(page.is_demo);
        assert_eq!(page.count, 3);
        assert_eq!(page.results.len(), 2);
        assert!(page.next.is_some());
    }

    #[tokio::test]
    async fn test_demo_product_lookup_by_id() {
        let gw = CatalogGateway::new(SupplierConfig::demo());
        let product = gw.get_product("demo-004").await.unwrap();
        assert_eq!(product.sku, "EYES-LINE-04");
        assert!(gw.get_product("missing").await.is_none());
    }
}
