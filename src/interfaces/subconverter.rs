use anyhow::{bail, Context};
use log::info;

use crate::error::{SourceError, SubscriptionError};
use crate::generator::yaml::clash::{attach, ConfigDocument};
use crate::parser::parse_settings::ParseSettings;
use crate::parser::source::{split_sources, DefaultSourceReader, SourceReader};
use crate::parser::subparser::get_proxies;
use crate::settings::Settings;
use crate::utils::file::{file_get, file_write};

/// Configuration for one conversion run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubconverterConfig {
    /// Subscription sources, processed in order
    pub sources: Vec<String>,
    /// Clash document the proxies are merged into
    pub base_config: Option<String>,
    pub parse_settings: ParseSettings,
}

/// Builder for SubconverterConfig
#[derive(Debug, Clone, Default)]
pub struct SubconverterConfigBuilder {
    config: SubconverterConfig,
}

impl SubconverterConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_source(mut self, source: &str) -> Self {
        self.config.sources.push(source.to_string());
        self
    }

    pub fn sources(mut self, sources: Vec<String>) -> Self {
        self.config.sources = sources;
        self
    }

    /// Set sources from a `;` separated list
    pub fn sources_from_str(mut self, sources: &str) -> Self {
        self.config.sources = split_sources(sources);
        self
    }

    pub fn base_config(mut self, path: Option<String>) -> Self {
        self.config.base_config = path.filter(|p| !p.trim().is_empty());
        self
    }

    pub fn parse_settings(mut self, parse_settings: ParseSettings) -> Self {
        self.config.parse_settings = parse_settings;
        self
    }

    /// Build the final configuration
    pub fn build(self) -> anyhow::Result<SubconverterConfig> {
        if self.config.sources.is_empty() {
            bail!("no subscription sources provided");
        }
        Ok(self.config)
    }
}

/// Load the base document, or start from an empty one
pub fn load_base_document(path: Option<&str>) -> Result<ConfigDocument, SourceError> {
    match path {
        Some(path) => {
            info!("Loading base configuration {}", path);
            Ok(ConfigDocument::from_yaml(&file_get(path)?)?)
        }
        None => Ok(ConfigDocument::new()),
    }
}

/// Run a conversion and return the finished document
///
/// The base document is loaded before any source is read; failing to load it
/// aborts the run.
pub fn subconverter(
    config: &SubconverterConfig,
    reader: &dyn SourceReader,
) -> Result<ConfigDocument, SubscriptionError> {
    let base = load_base_document(config.base_config.as_deref())?;

    info!("Processing {} subscription source(s)", config.sources.len());
    let batch = get_proxies(&config.sources, reader, &config.parse_settings)?;

    Ok(attach(batch, base))
}

/// Serialize the document and write it in one go
pub fn write_document(doc: &ConfigDocument, path: &str) -> anyhow::Result<()> {
    let yaml = doc.to_yaml().context("failed to serialize configuration")?;
    file_write(path, &yaml)?;
    info!("Wrote {} proxies to {}", doc.proxies().len(), path);
    Ok(())
}

/// Convert the sources named in `settings` and write the output file
pub fn run(settings: &Settings) -> anyhow::Result<()> {
    let config = SubconverterConfigBuilder::new()
        .sources(settings.sources.clone())
        .base_config(settings.base_config.clone())
        .parse_settings(settings.parse_settings())
        .build()?;

    let reader = DefaultSourceReader::new(&settings.http_config())
        .context("failed to create HTTP client")?;

    let doc = subconverter(&config, &reader)?;
    write_document(&doc, &settings.output)
}
