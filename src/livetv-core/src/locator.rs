use serde::{Deserialize, Serialize};
use std::fmt;

const COUNTRY_PREFIX: &str = "country:";
const CATEGORY_PREFIX: &str = "category:";

/// Opaque address of either a playable stream or a filtered catalog view.
///
/// Hosts only ever see the string form (see the [`fmt::Display`] impl); it is
/// parsed once when it comes back in and matched on from then on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Locator {
    /// An `http://` or `https://` URL that is already playable.
    DirectStream(String),
    /// `country:{code}`; the code is compared case-insensitively.
    ByCountry(String),
    /// `category:{name}`; the name is compared case-insensitively.
    ByCategory(String),
    Unrecognized(String),
}

impl Locator {
    pub fn parse(raw: &str) -> Self {
        if is_http_url(raw) {
            return Locator::DirectStream(raw.to_owned());
        }
        if let Some(code) = raw.strip_prefix(COUNTRY_PREFIX) {
            if !code.is_empty() {
                return Locator::ByCountry(code.to_owned());
            }
        }
        if let Some(name) = raw.strip_prefix(CATEGORY_PREFIX) {
            if !name.is_empty() {
                return Locator::ByCategory(name.to_owned());
            }
        }
        Locator::Unrecognized(raw.to_owned())
    }

    pub fn country(code: impl Into<String>) -> Self {
        Locator::ByCountry(code.into())
    }

    pub fn category(name: impl Into<String>) -> Self {
        Locator::ByCategory(name.into())
    }
}

fn is_http_url(raw: &str) -> bool {
    ["http://", "https://"].iter().any(|scheme| {
        raw.get(..scheme.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(scheme))
    })
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locator::DirectStream(url) => f.write_str(url),
            Locator::ByCountry(code) => write!(f, "{COUNTRY_PREFIX}{code}"),
            Locator::ByCategory(name) => write!(f, "{CATEGORY_PREFIX}{name}"),
            Locator::Unrecognized(raw) => f.write_str(raw),
        }
    }
}

impl From<&str> for Locator {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}

impl From<String> for Locator {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_direct_streams() {
        assert_eq!(
            Locator::parse("http://x/1.m3u8"),
            Locator::DirectStream("http://x/1.m3u8".into())
        );
        assert_eq!(
            Locator::parse("HTTPS://cdn.example/live.m3u8"),
            Locator::DirectStream("HTTPS://cdn.example/live.m3u8".into())
        );
    }

    #[test]
    fn parses_country_and_category_keys() {
        assert_eq!(Locator::parse("country:us"), Locator::country("us"));
        assert_eq!(
            Locator::parse("category:Kids & Family"),
            Locator::category("Kids & Family")
        );
    }

    #[test]
    fn anything_else_is_unrecognized() {
        for raw in ["", "ftp://x", "country:", "category:", "Country:US", "news"] {
            assert!(
                matches!(Locator::parse(raw), Locator::Unrecognized(_)),
                "{raw:?} should be unrecognized"
            );
        }
    }

    #[test]
    fn display_matches_parse_input() {
        for raw in ["country:GB", "category:News", "https://x/y.m3u8", "what"] {
            assert_eq!(Locator::parse(raw).to_string(), raw);
        }
    }

    #[test]
    fn non_ascii_input_does_not_panic() {
        assert!(matches!(
            Locator::parse("ñandú"),
            Locator::Unrecognized(_)
        ));
    }
}
