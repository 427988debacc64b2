use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single entry in a listing or search view.
///
/// `locator` is opaque to the host; it is handed back verbatim to
/// [`Provider::load`](crate::provider::Provider::load) after
/// [`Locator::parse`](crate::locator::Locator::parse).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub name: String,
    pub locator: String,
    pub poster_url: Option<String>,
}

impl SearchResult {
    pub fn new(name: impl Into<String>, locator: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            locator: locator.into(),
            poster_url: None,
        }
    }

    pub fn with_poster(mut self, poster_url: Option<String>) -> Self {
        self.poster_url = poster_url;
        self
    }
}

/// A titled row on the home page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HomeSection {
    pub title: String,
    pub items: Vec<SearchResult>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HomePage {
    pub sections: Vec<HomeSection>,
}

/// One playable entry inside a resolved listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Episode {
    pub name: String,
    /// Passed to [`Provider::load_links`](crate::provider::Provider::load_links).
    pub locator: String,
    pub poster_url: Option<String>,
    pub description: Option<String>,
}

/// Outcome of resolving a locator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LoadResult {
    /// Nothing matched, or the locator was not understood.
    Empty,
    /// A single direct stream.
    Stream {
        title: String,
        url: String,
        plot: Option<String>,
    },
    /// A filtered view over many channels.
    Listing {
        title: String,
        locator: String,
        episodes: Vec<Episode>,
    },
}

impl LoadResult {
    pub fn is_empty(&self) -> bool {
        matches!(self, LoadResult::Empty)
    }

    pub fn title(&self) -> Option<&str> {
        match self {
            LoadResult::Empty => None,
            LoadResult::Stream { title, .. } | LoadResult::Listing { title, .. } => Some(title),
        }
    }

    pub fn episodes(&self) -> &[Episode] {
        match self {
            LoadResult::Listing { episodes, .. } => episodes,
            _ => &[],
        }
    }
}

/// Stream quality as advertised to the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Quality {
    #[default]
    Unknown,
    /// Vertical resolution in pixels.
    Height(u32),
}

/// A link the host's player can open directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaybackLink {
    pub source: String,
    pub name: String,
    pub url: String,
    pub referer: Option<String>,
    pub quality: Quality,
    /// HLS playlist (`.m3u8`) rather than a progressive file.
    pub is_m3u8: bool,
    pub headers: BTreeMap<String, String>,
}

impl PlaybackLink {
    /// Wrap `url` as an HLS link with unknown quality and no extra headers.
    pub fn hls(source: impl Into<String>, url: impl Into<String>) -> Self {
        let source = source.into();
        Self {
            name: source.clone(),
            source,
            url: url.into(),
            referer: None,
            quality: Quality::Unknown,
            is_m3u8: true,
            headers: BTreeMap::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hls_link_is_identity_wrap() {
        let link = PlaybackLink::hls("IPTV Org", "http://x/1.m3u8");
        assert_eq!(link.url, "http://x/1.m3u8");
        assert_eq!(link.name, "IPTV Org");
        assert!(link.is_m3u8);
        assert_eq!(link.quality, Quality::Unknown);
        assert!(link.headers.is_empty());
        assert!(link.referer.is_none());
    }

    #[test]
    fn load_result_serializes_with_kind_tag() {
        let json = serde_json::to_value(LoadResult::Empty).unwrap();
        assert_eq!(json["kind"], "empty");

        let listing = LoadResult::Listing {
            title: "News".into(),
            locator: "category:News".into(),
            episodes: Vec::new(),
        };
        let json = serde_json::to_value(&listing).unwrap();
        assert_eq!(json["kind"], "listing");
        assert_eq!(json["title"], "News");
    }

    #[test]
    fn empty_has_no_title_or_episodes() {
        assert!(LoadResult::Empty.is_empty());
        assert_eq!(LoadResult::Empty.title(), None);
        assert!(LoadResult::Empty.episodes().is_empty());
    }
}
