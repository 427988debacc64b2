use anyhow::Result;
use clap::{Parser, Subcommand};
use iptv_org_provider::{IptvOrgConfig, IptvOrgProvider};
use livetv_core::models::{HomePage, LoadResult, PlaybackLink, SearchResult};
use livetv_core::provider::Provider;
use livetv_core::{init_logging, AppDirs, Config, Locator, ValidationError};
use serde::Serialize;
use std::fmt::Write as _;
use thiserror::Error;

#[derive(Debug, Parser)]
#[command(name = "livetv", version, about = "Browse the iptv-org live TV catalog")]
struct Cli {
    /// Catalog base URL override (takes precedence over config)
    #[arg(long, global = true)]
    base_url: Option<String>,
    /// Print results as JSON instead of text
    #[arg(long, global = true)]
    json: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List countries and categories
    Home,
    /// Find channels whose name contains QUERY (case-insensitive)
    Search { query: String },
    /// Resolve a locator (country:XX, category:Name or a stream URL)
    Load { locator: String },
    /// Print the playback link for a stream URL
    Link { url: String },
}

#[derive(Debug, Error)]
enum CliError {
    #[error("invalid --base-url: {0}")]
    BaseUrl(#[from] ValidationError),
}

impl Cli {
    fn catalog_config(&self, config: &Config) -> Result<IptvOrgConfig, CliError> {
        let mut catalog = config.catalog.clone();
        if let Some(base_url) = &self.base_url {
            catalog.base_url = base_url.clone();
            catalog.validate()?;
        }
        Ok(IptvOrgConfig::from(&catalog))
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let dirs = AppDirs::discover()?;
    let config = Config::load_or_default(&dirs)?;
    let _logging = init_logging(&config.logging, &dirs)?;

    let provider = IptvOrgProvider::new(cli.catalog_config(&config)?)?;
    tracing::info!(
        "Using provider '{}' ({}, lang {}) at {}",
        provider.name(),
        provider.id(),
        provider.lang(),
        provider.main_url()
    );

    let output = match &cli.command {
        Command::Home => {
            let page = provider.main_page().await?;
            render(cli.json, &page, render_home)?
        }
        Command::Search { query } => {
            let hits = provider.search(query).await?;
            tracing::debug!(query = %query, hits = hits.len(), "search finished");
            render(cli.json, &hits, |hits| render_results(hits))?
        }
        Command::Load { locator } => {
            let result = provider.load(&Locator::parse(locator)).await?;
            render(cli.json, &result, render_load)?
        }
        Command::Link { url } => {
            let links = provider.load_links(url).await?;
            render(cli.json, &links, |links| render_links(links))?
        }
    };
    print!("{output}");

    Ok(())
}

fn render<T: Serialize>(json: bool, value: &T, text: impl Fn(&T) -> String) -> Result<String> {
    if json {
        let mut out = serde_json::to_string_pretty(value)?;
        out.push('\n');
        Ok(out)
    } else {
        Ok(text(value))
    }
}

fn render_home(page: &HomePage) -> String {
    let mut out = String::new();
    for section in &page.sections {
        let _ = writeln!(out, "{} ({})", section.title, section.items.len());
        for item in &section.items {
            let _ = writeln!(out, "  {:<40} {}", item.name, item.locator);
        }
    }
    out
}

fn render_results(results: &[SearchResult]) -> String {
    if results.is_empty() {
        return "No channels found.\n".to_string();
    }
    let mut out = String::new();
    for item in results {
        let _ = writeln!(out, "{:<40} {}", item.name, item.locator);
    }
    out
}

fn render_load(result: &LoadResult) -> String {
    let mut out = String::new();
    match result {
        LoadResult::Empty => out.push_str("Nothing found.\n"),
        LoadResult::Stream { title, url, plot } => {
            let _ = writeln!(out, "{title}");
            if let Some(plot) = plot {
                let _ = writeln!(out, "  {plot}");
            }
            let _ = writeln!(out, "  {url}");
        }
        LoadResult::Listing {
            title, episodes, ..
        } => {
            let _ = writeln!(out, "{title} ({} channels)", episodes.len());
            for episode in episodes {
                let _ = writeln!(
                    out,
                    "  {:<40} {}  [{}]",
                    episode.name,
                    episode.locator,
                    episode.description.as_deref().unwrap_or_default()
                );
            }
        }
    }
    out
}

fn render_links(links: &[PlaybackLink]) -> String {
    let mut out = String::new();
    for link in links {
        let format = if link.is_m3u8 { "hls" } else { "file" };
        let _ = writeln!(out, "{} [{format}] {}", link.name, link.url);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use livetv_core::models::{Episode, HomeSection};

    #[test]
    fn parses_load_with_global_flags() {
        let cli = Cli::try_parse_from([
            "livetv",
            "load",
            "country:us",
            "--json",
            "--base-url",
            "http://localhost:8080",
        ])
        .expect("arguments should parse");
        assert!(cli.json);
        assert_eq!(cli.base_url.as_deref(), Some("http://localhost:8080"));
        assert!(matches!(cli.command, Command::Load { ref locator } if locator == "country:us"));
    }

    #[test]
    fn subcommand_is_required() {
        assert!(Cli::try_parse_from(["livetv"]).is_err());
    }

    #[test]
    fn base_url_override_is_validated() {
        let cli = Cli::try_parse_from(["livetv", "--base-url", "nope", "home"]).unwrap();
        let err = cli
            .catalog_config(&Config::default())
            .expect_err("bad url should be rejected");
        assert!(matches!(
            err,
            CliError::BaseUrl(ValidationError::InvalidUrl { .. })
        ));
    }

    #[test]
    fn base_url_override_replaces_config_value() {
        let cli =
            Cli::try_parse_from(["livetv", "--base-url", "http://mirror.local", "home"]).unwrap();
        let config = cli.catalog_config(&Config::default()).unwrap();
        assert_eq!(config.base_url, "http://mirror.local");
        assert!(config.cache_countries);
    }

    #[test]
    fn renders_listing_with_descriptions() {
        let result = LoadResult::Listing {
            title: "United States".into(),
            locator: "country:us".into(),
            episodes: vec![Episode {
                name: "CNN".into(),
                locator: "http://x/cnn.m3u8".into(),
                poster_url: None,
                description: Some("Category: News".into()),
            }],
        };
        let text = render_load(&result);
        assert!(text.starts_with("United States (1 channels)"));
        assert!(text.contains("http://x/cnn.m3u8"));
        assert!(text.contains("[Category: News]"));
    }

    #[test]
    fn renders_empty_results() {
        assert_eq!(render_load(&LoadResult::Empty), "Nothing found.\n");
        assert_eq!(render_results(&[]), "No channels found.\n");
    }

    #[test]
    fn json_output_uses_serde_shape() {
        let page = HomePage {
            sections: vec![HomeSection {
                title: "Countries".into(),
                items: vec![SearchResult::new("United States", "country:US")],
            }],
        };
        let out = render(true, &page, render_home).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["sections"][0]["items"][0]["locator"], "country:US");
    }

    #[test]
    fn renders_link_format() {
        let links = vec![PlaybackLink::hls("IPTV Org", "http://x/1.m3u8")];
        assert_eq!(render_links(&links), "IPTV Org [hls] http://x/1.m3u8\n");
    }
}
