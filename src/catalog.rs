use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Client;
use url::Url;

use crate::{
    error::ApiResult,
    http,
    models::{CatalogCard, CatalogPage},
};

/// Read-only access to the external card catalog.
#[async_trait]
pub trait CardCatalog: Send + Sync {
    async fn search(&self, query: &str) -> ApiResult<CatalogPage>;

    /// Follow a continuation cursor returned by a previous page.
    async fn page(&self, cursor: &str) -> ApiResult<CatalogPage>;

    async fn card(&self, id: &str) -> ApiResult<CatalogCard>;

    async fn image(&self, url: &str) -> ApiResult<Bytes>;
}

/// Scryfall-shaped catalog: `cards/search?q=` pages whose `next_page` is an
/// absolute URL.
#[derive(Debug, Clone)]
pub struct ScryfallCatalog {
    base: Url,
    client: Client,
}

impl ScryfallCatalog {
    pub fn new(base: Url, client: Client) -> Self {
        Self { base, client }
    }
}

#[async_trait]
impl CardCatalog for ScryfallCatalog {
    async fn search(&self, query: &str) -> ApiResult<CatalogPage> {
        let url = http::join(&self.base, &["cards", "search"])?;
        tracing::debug!(%query, "searching catalog");

        http::fetch_json(self.client.get(url).query(&[("q", query)])).await
    }

    async fn page(&self, cursor: &str) -> ApiResult<CatalogPage> {
        tracing::debug!(%cursor, "following catalog cursor");

        http::fetch_json(self.client.get(cursor)).await
    }

    async fn card(&self, id: &str) -> ApiResult<CatalogCard> {
        let url = http::join(&self.base, &["cards", id])?;

        http::fetch_json(self.client.get(url)).await
    }

    async fn image(&self, url: &str) -> ApiResult<Bytes> {
        Ok(http::send(self.client.get(url)).await?.bytes().await?)
    }
}
