use crate::models::{Category, Channel, Country};
use livetv_core::locator::Locator;
use livetv_core::models::{Episode, SearchResult};

pub const UNKNOWN_CATEGORY: &str = "Unknown";

pub fn flag_url(flag_base_url: &str, code: &str) -> String {
    format!(
        "{}/{}.png",
        flag_base_url.trim_end_matches('/'),
        code.to_lowercase()
    )
}

pub fn map_country(country: &Country, flag_base_url: &str) -> SearchResult {
    SearchResult::new(
        country.name.clone(),
        Locator::country(country.code.clone()).to_string(),
    )
    .with_poster(Some(flag_url(flag_base_url, &country.code)))
}

pub fn map_category(category: &Category) -> SearchResult {
    SearchResult::new(
        category.name.clone(),
        Locator::category(category.name.clone()).to_string(),
    )
}

/// Search hits point straight at the stream, not at a catalog view.
pub fn map_search_hit(channel: &Channel) -> SearchResult {
    SearchResult::new(channel.name.clone(), channel.url.clone()).with_poster(channel.logo.clone())
}

pub fn map_episode(channel: &Channel) -> Episode {
    Episode {
        name: channel.name.clone(),
        locator: channel.url.clone(),
        poster_url: channel.logo.clone(),
        description: Some(format!(
            "Category: {}",
            channel.category.as_deref().unwrap_or(UNKNOWN_CATEGORY)
        )),
    }
}
