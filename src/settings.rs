use std::fmt;
use std::fs;
use std::path::Path;

use log::debug;
use serde::de::{self, Deserializer, SeqAccess, Visitor};
use serde::{Deserialize, Serialize};

use crate::error::SettingsError;
use crate::generator::exports::proxy_to_clash::{ConvertSettings, DEFAULT_PLACEHOLDER_PREFIXES};
use crate::parser::parse_settings::ParseSettings;
use crate::parser::source::split_sources;
use crate::utils::http::{HttpConfig, DEFAULT_TIMEOUT, DEFAULT_USER_AGENT};

pub const DEFAULT_OUTPUT: &str = "config.yaml";

/// Settings structure for a conversion run
///
/// Every key is optional in the settings file; missing keys take the values
/// of [`Settings::default`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Subscription sources, either a `;` separated string or a list
    #[serde(deserialize_with = "deserialize_sources")]
    pub sources: Vec<String>,
    /// Clash document the proxies are merged into
    pub base_config: Option<String>,
    pub output: String,
    pub skip_failed_links: bool,
    pub detect_scheme_per_link: bool,
    pub placeholder_prefixes: Vec<String>,
    pub user_agent: String,
    pub fetch_timeout_secs: u64,
    /// Upstream proxy used for remote sources
    pub proxy: Option<String>,
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            sources: Vec::new(),
            base_config: None,
            output: DEFAULT_OUTPUT.to_string(),
            skip_failed_links: true,
            detect_scheme_per_link: true,
            placeholder_prefixes: DEFAULT_PLACEHOLDER_PREFIXES
                .iter()
                .map(|p| p.to_string())
                .collect(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            fetch_timeout_secs: DEFAULT_TIMEOUT,
            proxy: None,
            log_level: "info".to_string(),
        }
    }
}

impl Settings {
    /// Load settings from file
    ///
    /// `.toml` files are read as TOML and `.yaml`/`.yml` files as YAML. Any
    /// other extension is tried as TOML first, then as YAML.
    pub fn load_from_file(path: &str) -> Result<Self, SettingsError> {
        let content = fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_string(),
            source,
        })?;

        let extension = Path::new(path)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("toml") => Self::from_toml(&content),
            Some("yaml") | Some("yml") => Self::from_yaml(&content),
            _ => Self::from_toml(&content).or_else(|e| {
                debug!("{} is not TOML ({}), trying YAML", path, e);
                Self::from_yaml(&content)
            }),
        }
    }

    pub fn from_toml(content: &str) -> Result<Self, SettingsError> {
        Ok(toml::from_str(content)?)
    }

    pub fn from_yaml(content: &str) -> Result<Self, SettingsError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn parse_settings(&self) -> ParseSettings {
        ParseSettings {
            detect_scheme_per_link: self.detect_scheme_per_link,
            skip_failed_links: self.skip_failed_links,
            convert: ConvertSettings {
                placeholder_prefixes: self.placeholder_prefixes.clone(),
            },
        }
    }

    pub fn http_config(&self) -> HttpConfig {
        HttpConfig {
            user_agent: self.user_agent.clone(),
            timeout_secs: self.fetch_timeout_secs,
            proxy: self.proxy.clone(),
        }
    }
}

fn deserialize_sources<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    struct SourcesVisitor;

    impl<'de> Visitor<'de> for SourcesVisitor {
        type Value = Vec<String>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a `;` separated string or a list of strings")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(split_sources(value))
        }

        fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
        where
            A: SeqAccess<'de>,
        {
            let mut sources = Vec::new();
            while let Some(entry) = seq.next_element::<String>()? {
                sources.extend(split_sources(&entry));
            }
            Ok(sources)
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }
    }

    deserializer.deserialize_any(SourcesVisitor)
}
