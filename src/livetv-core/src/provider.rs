use crate::locator::Locator;
use crate::models::{HomePage, LoadResult, PlaybackLink, SearchResult};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Capability flags describing optional provider features.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ProviderCapabilities {
    /// Provider can build a home page without a query.
    pub main_page: bool,
    pub search: bool,
    /// Content is live TV rather than on-demand.
    pub live: bool,
}

impl ProviderCapabilities {
    pub fn supports_main_page(&self) -> bool {
        self.main_page
    }

    pub fn supports_search(&self) -> bool {
        self.search
    }
}

/// Common categories of provider failures surfaced to the host.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("operation not supported: {operation}")]
    NotSupported { operation: String },
    #[error("{message}")]
    Other { message: String },
}

pub type ProviderResult<T> = Result<T, ProviderError>;

/// Content provider driven by a media host.
///
/// The host decides when each call happens; a provider keeps no state of its
/// own beyond caches. Providers hand back **stream URLs only**; playback is the
/// host's job.
#[async_trait::async_trait]
pub trait Provider: Send + Sync {
    /// Stable provider identifier (e.g., "iptv-org").
    fn id(&self) -> &str;

    /// Human-friendly provider name.
    fn name(&self) -> &str;

    /// Primary language of the catalog (ISO 639-1).
    fn lang(&self) -> &str {
        "en"
    }

    /// Advertised capabilities.
    fn capabilities(&self) -> ProviderCapabilities;

    async fn main_page(&self) -> ProviderResult<HomePage> {
        Err(ProviderError::NotSupported {
            operation: "main_page".into(),
        })
    }

    async fn search(&self, _query: &str) -> ProviderResult<Vec<SearchResult>> {
        Err(ProviderError::NotSupported {
            operation: "search".into(),
        })
    }

    /// Resolves a locator previously handed out by `main_page` or `search`.
    async fn load(&self, locator: &Locator) -> ProviderResult<LoadResult>;

    /// Produces playable links for an episode or stream locator.
    async fn load_links(&self, data: &str) -> ProviderResult<Vec<PlaybackLink>>;
}
