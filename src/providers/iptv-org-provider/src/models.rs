//! Records served by the iptv-org static API.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
    pub code: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
}

/// Country embedded in a channel record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryRef {
    pub code: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Language {
    pub code: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Channel {
    pub name: String,
    pub url: String,
    #[serde(default)]
    pub logo: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub countries: Option<Vec<CountryRef>>,
    #[serde(default)]
    pub languages: Option<Vec<Language>>,
}

impl Channel {
    pub fn available_in(&self, code: &str) -> bool {
        self.countries
            .as_deref()
            .unwrap_or_default()
            .iter()
            .any(|c| c.code.eq_ignore_ascii_case(code))
    }

    pub fn in_category(&self, name: &str) -> bool {
        self.category
            .as_deref()
            .is_some_and(|c| c.to_lowercase() == name.to_lowercase())
    }

    pub fn name_contains(&self, needle_lower: &str) -> bool {
        self.name.to_lowercase().contains(needle_lower)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn optional_fields_may_be_missing_or_null() {
        let json = r#"[
            {"name": "Chan1", "url": "http://x/1.m3u8", "category": "News"},
            {"name": "Chan2", "url": "http://x/2.m3u8", "logo": null, "countries": null,
             "languages": [{"code": "eng", "name": "English"}]}
        ]"#;
        let channels: Vec<Channel> = serde_json::from_str(json).unwrap();
        assert_eq!(channels.len(), 2);
        assert_eq!(channels[0].category.as_deref(), Some("News"));
        assert!(channels[0].countries.is_none());
        assert!(channels[1].logo.is_none());
        assert_eq!(channels[1].languages.as_ref().unwrap()[0].name, "English");
    }

    #[test]
    fn missing_url_fails_to_decode() {
        let json = r#"[{"name": "Chan1"}]"#;
        assert!(serde_json::from_str::<Vec<Channel>>(json).is_err());
    }

    #[test]
    fn country_match_ignores_case() {
        let channel = Channel {
            name: "Chan".into(),
            url: "http://x".into(),
            logo: None,
            category: None,
            countries: Some(vec![CountryRef {
                code: "US".into(),
                name: "United States".into(),
            }]),
            languages: None,
        };
        assert!(channel.available_in("us"));
        assert!(channel.available_in("US"));
        assert!(!channel.available_in("gb"));
        assert!(!channel.in_category("News"));
    }
}
