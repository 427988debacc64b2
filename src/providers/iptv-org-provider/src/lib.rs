mod client;
mod mapping;
pub mod models;

pub use client::{CatalogClient, FetchError};

use livetv_core::config::{CatalogConfig, DEFAULT_BASE_URL, DEFAULT_FLAG_BASE_URL};
use livetv_core::locator::Locator;
use livetv_core::models::{HomePage, HomeSection, LoadResult, PlaybackLink, SearchResult};
use livetv_core::provider::{Provider, ProviderCapabilities, ProviderError, ProviderResult};
use mapping::{map_category, map_country, map_episode, map_search_hit};
use models::Channel;
use reqwest::Client;
use std::time::Duration;
use url::Url;

pub const COUNTRIES_SECTION: &str = "Countries";
pub const CATEGORIES_SECTION: &str = "Categories";
pub const DIRECT_STREAM_TITLE: &str = "Live Stream";
pub const DIRECT_STREAM_PLOT: &str = "Direct live stream";
pub const COUNTRY_TITLE_FALLBACK: &str = "Country Channels";

#[derive(Debug, Clone)]
pub struct IptvOrgConfig {
    pub base_url: String,
    pub flag_base_url: String,
    pub cache_countries: bool,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for IptvOrgConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            flag_base_url: DEFAULT_FLAG_BASE_URL.into(),
            cache_countries: true,
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(20),
        }
    }
}

impl From<&CatalogConfig> for IptvOrgConfig {
    fn from(config: &CatalogConfig) -> Self {
        Self {
            base_url: config.base_url.clone(),
            flag_base_url: config.flag_base_url.clone(),
            cache_countries: config.cache_countries,
            connect_timeout: Duration::from_secs(config.connect_timeout_secs),
            request_timeout: Duration::from_secs(config.request_timeout_secs),
        }
    }
}

/// Live TV catalog backed by the iptv-org public API.
///
/// Every listing operation is fail-open: fetch failures are logged and treated
/// as empty collections, so the host never sees an error from browsing.
pub struct IptvOrgProvider {
    id: String,
    name: String,
    main_url: String,
    flag_base_url: String,
    catalog: CatalogClient,
}

impl IptvOrgProvider {
    pub fn new(config: IptvOrgConfig) -> Result<Self, ProviderError> {
        let base_url = Url::parse(&config.base_url).map_err(|e| ProviderError::Other {
            message: format!("invalid base_url: {e}"),
        })?;
        let http = Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| ProviderError::Other {
                message: e.to_string(),
            })?;
        Ok(Self {
            id: "iptv-org".into(),
            name: "IPTV Org".into(),
            main_url: config.base_url,
            flag_base_url: config.flag_base_url,
            catalog: CatalogClient::new(http, base_url, config.cache_countries),
        })
    }

    /// The site the catalog is served from.
    pub fn main_url(&self) -> &str {
        &self.main_url
    }

    /// Raw access to the underlying collections, errors included.
    pub fn catalog(&self) -> &CatalogClient {
        &self.catalog
    }

    async fn country_title(&self, code: &str) -> String {
        self.catalog
            .countries_or_empty()
            .await
            .into_iter()
            .find(|c| c.code.eq_ignore_ascii_case(code))
            .map(|c| c.name)
            .unwrap_or_else(|| COUNTRY_TITLE_FALLBACK.into())
    }

    fn listing(title: String, locator: &Locator, channels: &[Channel]) -> LoadResult {
        if channels.is_empty() {
            return LoadResult::Empty;
        }
        LoadResult::Listing {
            title,
            locator: locator.to_string(),
            episodes: channels.iter().map(map_episode).collect(),
        }
    }
}

#[async_trait::async_trait]
impl Provider for IptvOrgProvider {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn capabilities(&self) -> ProviderCapabilities {
        ProviderCapabilities {
            main_page: true,
            search: true,
            live: true,
        }
    }

    async fn main_page(&self) -> ProviderResult<HomePage> {
        let countries = self.catalog.countries_or_empty().await;
        let categories = self.catalog.categories_or_empty().await;

        let country_items = countries
            .iter()
            .map(|c| map_country(c, &self.flag_base_url))
            .collect();
        let category_items = categories.iter().map(map_category).collect();

        Ok(HomePage {
            sections: vec![
                HomeSection {
                    title: COUNTRIES_SECTION.into(),
                    items: country_items,
                },
                HomeSection {
                    title: CATEGORIES_SECTION.into(),
                    items: category_items,
                },
            ],
        })
    }

    async fn search(&self, query: &str) -> ProviderResult<Vec<SearchResult>> {
        let needle = query.to_lowercase();
        let hits = self
            .catalog
            .channels_or_empty()
            .await
            .iter()
            .filter(|ch| ch.name_contains(&needle))
            .map(map_search_hit)
            .collect();
        Ok(hits)
    }

    async fn load(&self, locator: &Locator) -> ProviderResult<LoadResult> {
        let result = match locator {
            Locator::DirectStream(url) => LoadResult::Stream {
                title: DIRECT_STREAM_TITLE.into(),
                url: url.clone(),
                plot: Some(DIRECT_STREAM_PLOT.into()),
            },
            Locator::ByCountry(code) => {
                let channels: Vec<Channel> = self
                    .catalog
                    .channels_or_empty()
                    .await
                    .into_iter()
                    .filter(|ch| ch.available_in(code))
                    .collect();
                if channels.is_empty() {
                    LoadResult::Empty
                } else {
                    let title = self.country_title(code).await;
                    Self::listing(title, locator, &channels)
                }
            }
            Locator::ByCategory(name) => {
                let channels: Vec<Channel> = self
                    .catalog
                    .channels_or_empty()
                    .await
                    .into_iter()
                    .filter(|ch| ch.in_category(name))
                    .collect();
                Self::listing(name.clone(), locator, &channels)
            }
            Locator::Unrecognized(raw) => {
                tracing::debug!(locator = %raw, "unrecognized locator");
                LoadResult::Empty
            }
        };
        Ok(result)
    }

    async fn load_links(&self, data: &str) -> ProviderResult<Vec<PlaybackLink>> {
        Ok(vec![PlaybackLink::hls(self.name.clone(), data)])
    }
}
