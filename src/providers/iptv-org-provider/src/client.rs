//! HTTP access to the three iptv-org collections.
//!
//! Every `fetch_*` call reports failures as [`FetchError`]; the `*_or_empty`
//! variants log the failure and collapse it to an empty list, which is what the
//! provider surface uses.

use crate::models::{Category, Channel, Country};
use livetv_core::cache::LazyCache;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;
use url::Url;

const COUNTRIES_PATH: &str = "api/countries.json";
const CATEGORIES_PATH: &str = "api/categories.json";
const CHANNELS_PATH: &str = "api/channels.json";

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid endpoint {path}: {source}")]
    Endpoint {
        path: &'static str,
        source: url::ParseError,
    },
    #[error("request to {url} failed: {source}")]
    Request { url: Url, source: reqwest::Error },
    #[error("{url} returned {status}")]
    Status { url: Url, status: StatusCode },
    #[error("failed to decode {url}: {source}")]
    Decode { url: Url, source: reqwest::Error },
}

pub struct CatalogClient {
    http: Client,
    base_url: Url,
    countries: Option<LazyCache<Vec<Country>>>,
}

impl CatalogClient {
    /// `cache_countries` keeps the first successfully fetched country list for
    /// the life of this client.
    pub fn new(http: Client, base_url: Url, cache_countries: bool) -> Self {
        Self {
            http,
            base_url: with_trailing_slash(base_url),
            countries: cache_countries.then(LazyCache::new),
        }
    }

    pub async fn fetch_countries(&self) -> Result<Vec<Country>, FetchError> {
        match &self.countries {
            Some(cache) => cache
                .get_or_try_init(|| self.get_json(COUNTRIES_PATH))
                .await
                .cloned(),
            None => self.get_json(COUNTRIES_PATH).await,
        }
    }

    pub async fn fetch_categories(&self) -> Result<Vec<Category>, FetchError> {
        self.get_json(CATEGORIES_PATH).await
    }

    pub async fn fetch_channels(&self) -> Result<Vec<Channel>, FetchError> {
        self.get_json(CHANNELS_PATH).await
    }

    pub async fn countries_or_empty(&self) -> Vec<Country> {
        or_empty(self.fetch_countries().await)
    }

    pub async fn categories_or_empty(&self) -> Vec<Category> {
        or_empty(self.fetch_categories().await)
    }

    pub async fn channels_or_empty(&self) -> Vec<Channel> {
        or_empty(self.fetch_channels().await)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &'static str) -> Result<Vec<T>, FetchError> {
        let url = self
            .base_url
            .join(path)
            .map_err(|source| FetchError::Endpoint { path, source })?;
        let resp = self
            .http
            .get(url.clone())
            .send()
            .await
            .map_err(|source| FetchError::Request {
                url: url.clone(),
                source,
            })?;
        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status { url, status });
        }
        let items: Vec<T> = resp
            .json()
            .await
            .map_err(|source| FetchError::Decode {
                url: url.clone(),
                source,
            })?;
        tracing::debug!(%url, count = items.len(), "fetched catalog collection");
        Ok(items)
    }
}

fn or_empty<T>(result: Result<Vec<T>, FetchError>) -> Vec<T> {
    result.unwrap_or_else(|err| {
        tracing::warn!(error = %err, "catalog fetch failed, continuing with an empty list");
        Vec::new()
    })
}

/// `Url::join` drops the last path segment unless it ends in `/`.
fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}
