//! Configuration module for Contact Hub.
//!
//! Loads runtime settings from environment variables. The site content
//! itself comes from the configuration document, see [`crate::loader`].

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use tracing::warn;

const DEFAULT_SOURCE: &str = "config.json";
const DEFAULT_OUTPUT: &str = "index.html";
const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 10;

/// Card to click once the page is rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivationTarget {
    pub group_id: String,
    pub item_id: String,
}

impl ActivationTarget {
    /// Parse `group_id/item_id`.
    pub fn parse(value: &str) -> Option<Self> {
        let (group, item) = value.trim().split_once('/')?;
        if group.is_empty() || item.is_empty() {
            return None;
        }
        Some(Self {
            group_id: group.to_string(),
            item_id: item.to_string(),
        })
    }
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Path or `file://` URL of the site configuration document.
    pub source: String,

    /// Where the rendered HTML is written.
    pub output_path: PathBuf,

    /// Upper bound on the document fetch. `None` waits forever.
    pub fetch_timeout: Option<Duration>,

    /// Optional card to activate after rendering.
    pub activate: Option<ActivationTarget>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source: DEFAULT_SOURCE.to_string(),
            output_path: PathBuf::from(DEFAULT_OUTPUT),
            fetch_timeout: Some(Duration::from_secs(DEFAULT_FETCH_TIMEOUT_SECS)),
            activate: None,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Every variable is optional. Invalid values are logged and replaced by
    /// their defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let source = lookup("CONFIG_SOURCE")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or(defaults.source);

        let output_path = lookup("OUTPUT_PATH")
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.output_path);

        let fetch_timeout = match lookup("FETCH_TIMEOUT_SECS") {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(0) => None,
                Ok(secs) => Some(Duration::from_secs(secs)),
                Err(_) => {
                    warn!("Invalid FETCH_TIMEOUT_SECS '{}', using default", raw);
                    defaults.fetch_timeout
                }
            },
            None => defaults.fetch_timeout,
        };

        let activate = lookup("ACTIVATE").and_then(|raw| {
            let target = ActivationTarget::parse(&raw);
            if target.is_none() {
                warn!("Invalid ACTIVATE '{}', expected group_id/item_id", raw);
            }
            target
        });

        Self {
            source,
            output_path,
            fetch_timeout,
            activate,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn from_pairs(pairs: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = from_pairs(&[]);
        assert_eq!(config.source, "config.json");
        assert_eq!(config.output_path, PathBuf::from("index.html"));
        assert_eq!(config.fetch_timeout, Some(Duration::from_secs(10)));
        assert!(config.activate.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = from_pairs(&[
            ("CONFIG_SOURCE", "file:///srv/site.json"),
            ("OUTPUT_PATH", "out/page.html"),
            ("FETCH_TIMEOUT_SECS", "0"),
            ("ACTIVATE", "contact_admin/whatsapp"),
        ]);
        assert_eq!(config.source, "file:///srv/site.json");
        assert_eq!(config.output_path, PathBuf::from("out/page.html"));
        assert_eq!(config.fetch_timeout, None);
        assert_eq!(
            config.activate,
            Some(ActivationTarget {
                group_id: "contact_admin".to_string(),
                item_id: "whatsapp".to_string(),
            })
        );
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = from_pairs(&[("FETCH_TIMEOUT_SECS", "soon"), ("ACTIVATE", "whatsapp")]);
        assert_eq!(config.fetch_timeout, Some(Duration::from_secs(10)));
        assert!(config.activate.is_none());
    }

    #[test]
    fn test_activation_target_parse() {
        assert!(ActivationTarget::parse("/x").is_none());
        assert!(ActivationTarget::parse("g/").is_none());
        assert_eq!(ActivationTarget::parse(" g/i ").unwrap().item_id, "i");
    }
}
