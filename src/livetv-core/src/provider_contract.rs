use crate::locator::Locator;
use crate::models::LoadResult;
use crate::provider::{Provider, ProviderError};
use thiserror::Error;

/// Expectations supplied by a provider implementation to run the shared contract suite.
#[derive(Debug, Clone)]
pub struct ProviderContractExpectations {
    /// Required search expectation (ignored when search is not advertised).
    pub search: SearchExpectation,
    /// A locator from the home page that must resolve to a non-empty listing.
    pub browse: Option<BrowseExpectation>,
    /// Stream URL used to validate link resolution.
    pub stream_url: String,
}

/// Search expectation used to validate provider search behavior.
#[derive(Debug, Clone)]
pub struct SearchExpectation {
    pub query: String,
    /// The first locator expected for the query (deterministic ordering).
    pub expected_first_locator: String,
}

#[derive(Debug, Clone)]
pub struct BrowseExpectation {
    pub locator: Locator,
    pub expected_title: String,
}

/// Errors surfaced by the provider contract test harness.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProviderContractError {
    #[error("provider advertises a main page but returned no sections")]
    MainPageEmpty,
    #[error("main page entry {name:?} has an unrecognized locator {locator:?}")]
    MainPageBadLocator { name: String, locator: String },
    #[error("provider does not advertise a main page but main_page did not return NotSupported")]
    MainPageNotSupportedExpected,
    #[error("search returned no results for query: {query}")]
    EmptySearch { query: String },
    #[error("search returned wrong first locator: expected {expected:?}, got {actual:?}")]
    SearchWrongFirstLocator { expected: String, actual: String },
    #[error("provider does not advertise search but search did not return NotSupported")]
    SearchNotSupportedExpected,
    #[error("unrecognized locator resolved to {actual:?} instead of Empty")]
    UnrecognizedNotEmpty { actual: String },
    #[error("browse locator {locator} did not resolve to a listing")]
    BrowseNotListing { locator: String },
    #[error("browse listing title mismatch: expected {expected:?}, got {actual:?}")]
    BrowseWrongTitle { expected: String, actual: String },
    #[error("episode {name:?} has an empty locator")]
    EmptyEpisodeLocator { name: String },
    #[error("load_links returned no links for {url}")]
    NoLinks { url: String },
    #[error("load_links rewrote {expected:?} to {actual:?}")]
    LinkUrlMismatch { expected: String, actual: String },
    #[error("provider error while running contract: {0}")]
    ProviderFailure(String),
}

/// Run the shared provider contract suite against a provider implementation.
///
/// Providers should call this from their crate-level tests with fixtures served
/// by their test setup.
pub async fn run_provider_contract<P: Provider>(
    provider: &P,
    expectations: &ProviderContractExpectations,
) -> Result<(), ProviderContractError> {
    verify_main_page(provider).await?;
    verify_search(provider, expectations).await?;
    verify_load(provider, expectations).await?;
    verify_links(provider, expectations).await?;
    Ok(())
}

async fn verify_main_page<P: Provider>(provider: &P) -> Result<(), ProviderContractError> {
    if !provider.capabilities().supports_main_page() {
        return match provider.main_page().await {
            Err(ProviderError::NotSupported { .. }) => Ok(()),
            _ => Err(ProviderContractError::MainPageNotSupportedExpected),
        };
    }

    let page = provider
        .main_page()
        .await
        .map_err(|e| ProviderContractError::ProviderFailure(e.to_string()))?;
    if page.sections.is_empty() {
        return Err(ProviderContractError::MainPageEmpty);
    }

    let bad = page
        .sections
        .iter()
        .flat_map(|s| &s.items)
        .find(|item| matches!(Locator::parse(&item.locator), Locator::Unrecognized(_)));
    if let Some(item) = bad {
        return Err(ProviderContractError::MainPageBadLocator {
            name: item.name.clone(),
            locator: item.locator.clone(),
        });
    }
    Ok(())
}

async fn verify_search<P: Provider>(
    provider: &P,
    expectations: &ProviderContractExpectations,
) -> Result<(), ProviderContractError> {
    if !provider.capabilities().supports_search() {
        return match provider.search("irrelevant").await {
            Err(ProviderError::NotSupported { .. }) => Ok(()),
            _ => Err(ProviderContractError::SearchNotSupportedExpected),
        };
    }

    let results = provider
        .search(&expectations.search.query)
        .await
        .map_err(|e| ProviderContractError::ProviderFailure(e.to_string()))?;
    let first = results
        .first()
        .ok_or_else(|| ProviderContractError::EmptySearch {
            query: expectations.search.query.clone(),
        })?;
    if first.locator != expectations.search.expected_first_locator {
        return Err(ProviderContractError::SearchWrongFirstLocator {
            expected: expectations.search.expected_first_locator.clone(),
            actual: first.locator.clone(),
        });
    }
    Ok(())
}

async fn verify_load<P: Provider>(
    provider: &P,
    expectations: &ProviderContractExpectations,
) -> Result<(), ProviderContractError> {
    let unrecognized = Locator::parse("no-such-locator");
    let result = provider
        .load(&unrecognized)
        .await
        .map_err(|e| ProviderContractError::ProviderFailure(e.to_string()))?;
    if !result.is_empty() {
        return Err(ProviderContractError::UnrecognizedNotEmpty {
            actual: format!("{result:?}"),
        });
    }

    let Some(browse) = &expectations.browse else {
        return Ok(());
    };
    let result = provider
        .load(&browse.locator)
        .await
        .map_err(|e| ProviderContractError::ProviderFailure(e.to_string()))?;
    let LoadResult::Listing {
        title, episodes, ..
    } = result
    else {
        return Err(ProviderContractError::BrowseNotListing {
            locator: browse.locator.to_string(),
        });
    };
    if title != browse.expected_title {
        return Err(ProviderContractError::BrowseWrongTitle {
            expected: browse.expected_title.clone(),
            actual: title,
        });
    }
    if let Some(episode) = episodes.iter().find(|e| e.locator.trim().is_empty()) {
        return Err(ProviderContractError::EmptyEpisodeLocator {
            name: episode.name.clone(),
        });
    }
    Ok(())
}

async fn verify_links<P: Provider>(
    provider: &P,
    expectations: &ProviderContractExpectations,
) -> Result<(), ProviderContractError> {
    let links = provider
        .load_links(&expectations.stream_url)
        .await
        .map_err(|e| ProviderContractError::ProviderFailure(e.to_string()))?;
    let first = links.first().ok_or_else(|| ProviderContractError::NoLinks {
        url: expectations.stream_url.clone(),
    })?;
    if first.url != expectations.stream_url {
        return Err(ProviderContractError::LinkUrlMismatch {
            expected: expectations.stream_url.clone(),
            actual: first.url.clone(),
        });
    }
    Ok(())
}
