use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use std::fmt;
use thiserror::Error;
use tracing::{debug, instrument, warn};

use crate::config::{Config, ConfigError};
use crate::model::{CatalogItem, ItemId};

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid endpoint: {0}")]
    Endpoint(String),
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("unexpected status {0}")]
    Status(StatusCode),
    #[error("malformed response body: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Retrieval of product records from the remote service.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// All products in summary form, in service order. Any status other than
    /// 200 yields an empty list rather than an error.
    async fn fetch_catalog(&self) -> Result<Vec<CatalogItem>, FetchError>;

    /// One product with every field populated.
    async fn fetch_item(&self, id: ItemId) -> Result<CatalogItem, FetchError>;
}

#[derive(Clone)]
pub struct HttpCatalogApi {
    http: Client,
    base_url: Url,
}

impl fmt::Debug for HttpCatalogApi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpCatalogApi")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl HttpCatalogApi {
    pub fn from_config(cfg: &Config) -> Result<Self, ConfigError> {
        let base_url = cfg.api.base_url()?;
        let http = Client::builder()
            .user_agent(cfg.api.user_agent.clone())
            .timeout(cfg.api.timeout())
            .no_proxy()
            .build()?;
        Ok(Self::with_client(http, base_url))
    }

    pub fn with_client(http: Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn catalog_url(&self) -> Result<Url, FetchError> {
        self.base_url
            .join("products")
            .map_err(|e| FetchError::Endpoint(e.to_string()))
    }

    pub fn item_url(&self, id: ItemId) -> Result<Url, FetchError> {
        self.base_url
            .join(&format!("products/{}", id))
            .map_err(|e| FetchError::Endpoint(e.to_string()))
    }

    pub fn build_get(&self, url: Url) -> Result<reqwest::Request, FetchError> {
        Ok(self
            .http
            .get(url)
            .header("Accept", "application/json")
            .build()?)
    }

    async fn get(&self, url: Url) -> Result<(StatusCode, Vec<u8>), FetchError> {
        let request = self.build_get(url)?;
        debug!(url=%request.url(), "sending catalog request");
        let res = self.http.execute(request).await?;
        let status = res.status();
        let body = res.bytes().await?;
        debug!(%status, bytes = body.len(), "catalog response");
        Ok((status, body.to_vec()))
    }
}

#[async_trait]
impl CatalogApi for HttpCatalogApi {
    #[instrument(skip_all)]
    async fn fetch_catalog(&self) -> Result<Vec<CatalogItem>, FetchError> {
        let url = self.catalog_url()?;
        let (status, body) = self.get(url).await?;
        summarize_listing(status, &body)
    }

    #[instrument(skip_all, fields(%id))]
    async fn fetch_item(&self, id: ItemId) -> Result<CatalogItem, FetchError> {
        let url = self.item_url(id)?;
        let (status, body) = self.get(url).await?;
        parse_item(status, &body)
    }
}

/// Map a listing response into summary records. Non-200 bodies are never parsed.
pub fn summarize_listing(status: StatusCode, body: &[u8]) -> Result<Vec<CatalogItem>, FetchError> {
    if status != StatusCode::OK {
        warn!(%status, "catalog listing not available; showing empty list");
        return Ok(Vec::new());
    }
    let records: Vec<CatalogItem> = serde_json::from_slice(body)?;
    Ok(records.into_iter().map(CatalogItem::into_summary).collect())
}

pub fn parse_item(status: StatusCode, body: &[u8]) -> Result<CatalogItem, FetchError> {
    if !status.is_success() {
        return Err(FetchError::Status(status));
    }
    Ok(serde_json::from_slice(body)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const FAKESTORE_API_BASE: &str = "https://fakestoreapi.com/";

    fn client(base: &str) -> HttpCatalogApi {
        HttpCatalogApi::with_client(Client::new(), Url::parse(base).unwrap())
    }

    fn listing() -> Vec<u8> {
        serde_json::to_vec(&json!([
            { "id": 2, "title": "B", "price": 22.3, "description": "bd", "category": "men", "image": "u2" },
            { "id": 1, "title": "A", "price": 109.95, "description": "ad", "category": "women", "image": "u1" },
            { "id": 9, "title": "C", "price": 64, "description": "cd", "category": "electronics", "image": "u9" }
        ]))
        .unwrap()
    }

    #[test]
    fn client_build_error_is_kept() {
        let mut cfg: Config = serde_yaml::from_str(crate::config::example()).unwrap();
        cfg.api.user_agent = "bad\nagent".into();
        let err = HttpCatalogApi::from_config(&cfg).unwrap_err();
        assert!(matches!(err, ConfigError::Http(_)));
    }

    #[test]
    fn endpoints_are_relative_to_base() {
        let api = client(FAKESTORE_API_BASE);
        assert_eq!(api.catalog_url().unwrap().as_str(), "https://fakestoreapi.com/products");
        assert_eq!(
            api.item_url(ItemId(7)).unwrap().as_str(),
            "https://fakestoreapi.com/products/7"
        );
    }

    #[test]
    fn build_get_sets_method_and_accept() {
        let api = client(FAKESTORE_API_BASE);
        let req = api.build_get(api.catalog_url().unwrap()).unwrap();
        assert_eq!(req.method(), reqwest::Method::GET);
        assert_eq!(
            req.headers().get("Accept").and_then(|h| h.to_str().ok()).unwrap(),
            "application/json"
        );
    }

    #[test]
    fn listing_keeps_order_and_truncates() {
        let items = summarize_listing(StatusCode::OK, &listing()).unwrap();
        assert_eq!(items.len(), 3);
        let ids: Vec<i64> = items.iter().map(|i| i.id.0).collect();
        assert_eq!(ids, vec![2, 1, 9]);
        assert_eq!(items[1].title, "A");
        assert_eq!(items[1].price, 109.95);
        assert_eq!(items[2].image, "u9");
        assert!(items.iter().all(CatalogItem::is_summary));
    }

    #[test]
    fn listing_non_200_is_empty_whatever_the_body() {
        for status in [StatusCode::INTERNAL_SERVER_ERROR, StatusCode::NOT_FOUND, StatusCode::NO_CONTENT] {
            assert!(summarize_listing(status, &listing()).unwrap().is_empty());
            assert!(summarize_listing(status, b"<html>oops</html>").unwrap().is_empty());
        }
    }

    #[test]
    fn listing_malformed_body_is_decode_error() {
        let err = summarize_listing(StatusCode::OK, b"{\"not\":\"an array\"}").unwrap_err();
        assert!(matches!(err, FetchError::Decode(_)));
    }

    #[test]
    fn item_keeps_detail_fields() {
        let body = serde_json::to_vec(&json!({
            "id": 3, "title": "Jacket", "price": 55.99,
            "description": "warm", "category": "men's clothing", "image": "u3"
        }))
        .unwrap();
        let item = parse_item(StatusCode::OK, &body).unwrap();
        assert_eq!(item.id, ItemId(3));
        assert!(!item.description.unwrap().is_empty());
        assert!(!item.category.unwrap().is_empty());
    }

    #[test]
    fn item_error_status() {
        let err = parse_item(StatusCode::NOT_FOUND, b"").unwrap_err();
        assert!(matches!(err, FetchError::Status(StatusCode::NOT_FOUND)));
    }
}
