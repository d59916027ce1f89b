//! Settings structures for WikiAgent configuration

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Main settings structure matching settings.yml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub server: ServerSettings,
    pub outgoing: OutgoingSettings,
    pub wikipedia: WikipediaSettings,
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse settings from a YAML string
    pub fn from_yaml(content: &str) -> Result<Self> {
        let settings: Settings = serde_yaml::from_str(content)?;
        Ok(settings)
    }

    /// Merge with environment variables (WIKIAGENT_* prefix)
    pub fn merge_env(&mut self) {
        self.merge_vars(|key| std::env::var(key).ok());
    }

    /// Apply overrides from an arbitrary variable source
    pub fn merge_vars<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(val) = lookup("WIKIAGENT_DEBUG") {
            self.general.debug = val.parse().unwrap_or(false);
        }
        if let Some(val) = lookup("WIKIAGENT_PORT") {
            if let Ok(port) = val.parse() {
                self.server.port = port;
            }
        }
        if let Some(val) = lookup("WIKIAGENT_BIND_ADDRESS") {
            self.server.bind_address = val;
        }
        if let Some(val) = lookup("WIKIAGENT_LANG") {
            self.wikipedia.lang = val;
        }
        if let Some(val) = lookup("WIKIAGENT_REQUEST_TIMEOUT") {
            if let Ok(timeout) = val.parse() {
                self.outgoing.request_timeout = timeout;
            }
        }
        if let Some(val) = lookup("WIKIAGENT_EXTRACT_BUDGET") {
            // "none" disables truncation entirely
            if val.eq_ignore_ascii_case("none") {
                self.wikipedia.extract_budget = None;
            } else if let Ok(budget) = val.parse() {
                self.wikipedia.extract_budget = Some(budget);
            }
        }
    }

    /// Check values that would otherwise only fail at request time
    pub fn validate(&self) -> Result<()> {
        let timeout = self.outgoing.request_timeout;
        if !timeout.is_finite() || timeout <= 0.0 || timeout > crate::MAX_TIMEOUT as f64 {
            bail!(
                "outgoing.request_timeout must be in (0, {}] seconds, got {}",
                crate::MAX_TIMEOUT,
                timeout
            );
        }
        if self.wikipedia.extract_budget == Some(0) {
            bail!("wikipedia.extract_budget must be at least 1 (or unset)");
        }
        if self.wikipedia.lang.trim().is_empty() {
            bail!("wikipedia.lang must not be empty");
        }

        let lang = self.wikipedia.base_lang();
        let api_url = self.wikipedia.api_url.replace("{lang}", lang);
        url::Url::parse(&api_url)
            .map_err(|e| anyhow::anyhow!("invalid wikipedia.api_url '{}': {}", api_url, e))?;

        if !self.wikipedia.article_url.contains("{title}") {
            bail!("wikipedia.article_url must contain a {{title}} placeholder");
        }
        let article_url = self
            .wikipedia
            .article_url
            .replace("{lang}", lang)
            .replace("{title}", "Main_Page");
        url::Url::parse(&article_url).map_err(|e| {
            anyhow::anyhow!("invalid wikipedia.article_url '{}': {}", article_url, e)
        })?;
        Ok(())
    }
}

/// General settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Enable debug logging
    pub debug: bool,
    /// Instance name displayed in UI
    pub instance_name: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            debug: false,
            instance_name: "WikiAgent".to_string(),
        }
    }
}

/// Server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Server port
    pub port: u16,
    /// Bind address
    pub bind_address: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            port: 3000,
            bind_address: "127.0.0.1".to_string(),
        }
    }
}

/// Outgoing request settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutgoingSettings {
    /// Per-call upstream timeout in seconds
    pub request_timeout: f64,
    /// Appended to the WikiAgent user agent, e.g. a contact address
    pub useragent_suffix: Option<String>,
    /// Pool max size
    pub pool_maxsize: usize,
    /// Verify SSL certificates
    pub verify_ssl: bool,
    /// Proxy settings
    pub proxies: ProxySettings,
    /// Extra headers to send
    pub extra_headers: HashMap<String, String>,
}

impl Default for OutgoingSettings {
    fn default() -> Self {
        Self {
            request_timeout: crate::DEFAULT_TIMEOUT as f64,
            useragent_suffix: None,
            pool_maxsize: 20,
            verify_ssl: true,
            proxies: ProxySettings::default(),
            extra_headers: HashMap::new(),
        }
    }
}

/// Proxy settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProxySettings {
    pub http: Option<String>,
    pub https: Option<String>,
    pub all: Option<String>,
}

/// Upstream MediaWiki settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WikipediaSettings {
    /// Query API endpoint; `{lang}` is substituted
    pub api_url: String,
    /// Article URL template; `{lang}` and `{title}` are substituted
    pub article_url: String,
    /// Wiki language code
    pub lang: String,
    /// Number of search hits requested (only the first is used)
    pub search_limit: u32,
    /// Requested thumbnail width in pixels
    pub thumbnail_size: u32,
    /// Restrict extracts to the lead section
    pub intro_only: bool,
    /// Maximum answer length in characters, `None` for no limit
    pub extract_budget: Option<usize>,
}

impl WikipediaSettings {
    /// Base language code substituted for `{lang}` ("de" for "de-AT")
    pub fn base_lang(&self) -> &str {
        match self.lang.trim().split('-').next() {
            Some(lang) if !lang.is_empty() => lang,
            _ => "en",
        }
    }
}

impl Default for WikipediaSettings {
    fn default() -> Self {
        Self {
            api_url: "https://{lang}.wikipedia.org/w/api.php".to_string(),
            article_url: "https://{lang}.wikipedia.org/wiki/{title}".to_string(),
            lang: "en".to_string(),
            search_limit: 1,
            thumbnail_size: 500,
            intro_only: true,
            extract_budget: Some(1200),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.server.port, 3000);
        assert!(!settings.general.debug);
        assert_eq!(settings.outgoing.request_timeout, 5.0);
        assert_eq!(settings.wikipedia.extract_budget, Some(1200));
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let settings = Settings::from_yaml(
            "server:\n  port: 9000\nwikipedia:\n  lang: de\n  extract_budget: 300\n",
        )
        .unwrap();
        assert_eq!(settings.server.port, 9000);
        assert_eq!(settings.server.bind_address, "127.0.0.1");
        assert_eq!(settings.wikipedia.lang, "de");
        assert_eq!(settings.wikipedia.extract_budget, Some(300));
        assert_eq!(settings.wikipedia.thumbnail_size, 500);
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> = [
            ("WIKIAGENT_PORT", "8080"),
            ("WIKIAGENT_LANG", "fr"),
            ("WIKIAGENT_EXTRACT_BUDGET", "none"),
            ("WIKIAGENT_REQUEST_TIMEOUT", "2.5"),
        ]
        .into_iter()
        .collect();

        let mut settings = Settings::default();
        settings.merge_vars(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(settings.server.port, 8080);
        assert_eq!(settings.wikipedia.lang, "fr");
        assert_eq!(settings.wikipedia.extract_budget, None);
        assert_eq!(settings.outgoing.request_timeout, 2.5);
    }

    #[test]
    fn test_invalid_port_is_ignored() {
        let mut settings = Settings::default();
        settings.merge_vars(|key| (key == "WIKIAGENT_PORT").then(|| "not-a-port".to_string()));
        assert_eq!(settings.server.port, 3000);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut settings = Settings::default();
        settings.outgoing.request_timeout = 0.0;
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.wikipedia.extract_budget = Some(0);
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.wikipedia.api_url = "not a url".to_string();
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_unusable_timeouts() {
        for yaml in [
            "outgoing:\n  request_timeout: 1.0e30\n",
            "outgoing:\n  request_timeout: .inf\n",
            "outgoing:\n  request_timeout: .nan\n",
            "outgoing:\n  request_timeout: -1.0\n",
            "outgoing:\n  request_timeout: 31.0\n",
        ] {
            let settings = Settings::from_yaml(yaml).unwrap();
            assert!(settings.validate().is_err(), "accepted: {}", yaml);
        }

        let settings = Settings::from_yaml("outgoing:\n  request_timeout: 30.0\n").unwrap();
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_client_construction_reports_bad_timeouts() {
        use crate::network::HttpClient;

        for timeout in [1.0e30, f64::INFINITY, f64::NAN, -1.0] {
            let settings = OutgoingSettings {
                request_timeout: timeout,
                ..Default::default()
            };
            assert!(HttpClient::with_settings(&settings).is_err(), "timeout {}", timeout);
        }
    }

    #[test]
    fn test_base_lang() {
        let mut wikipedia = WikipediaSettings::default();
        assert_eq!(wikipedia.base_lang(), "en");
        wikipedia.lang = "de-AT".to_string();
        assert_eq!(wikipedia.base_lang(), "de");
    }

    #[test]
    fn test_validate_uses_base_lang_for_urls() {
        // only "en" reaches the host; the full tag would not parse as one
        let mut settings = Settings::default();
        settings.wikipedia.lang = "en-with space".to_string();
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_validate_requires_title_placeholder() {
        let mut settings = Settings::default();
        settings.wikipedia.article_url = "https://{lang}.wikipedia.org/wiki/".to_string();
        let err = settings.validate().unwrap_err();
        assert!(err.to_string().contains("{title}"));

        let mut settings = Settings::default();
        settings.wikipedia.article_url = "{title}".to_string();
        assert!(settings.validate().is_err());
    }
}
