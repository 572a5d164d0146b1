use log::debug;
use reqwest::blocking::Client;

use crate::error::SourceError;
use crate::utils::file::file_get;
use crate::utils::http::{build_client, web_get, HttpConfig};
use crate::utils::url::is_link;

/// Anything that can turn a source identifier into its raw text
pub trait SourceReader {
    fn read(&self, source: &str) -> Result<String, SourceError>;
}

/// Reads `http(s)://` sources over the network and everything else from disk
pub struct DefaultSourceReader {
    client: Client,
}

impl DefaultSourceReader {
    pub fn new(config: &HttpConfig) -> Result<Self, reqwest::Error> {
        Ok(DefaultSourceReader {
            client: build_client(config)?,
        })
    }
}

impl SourceReader for DefaultSourceReader {
    fn read(&self, source: &str) -> Result<String, SourceError> {
        if is_link(source) {
            debug!("Fetching subscription {}", source);
            web_get(&self.client, source)
        } else {
            debug!("Reading local subscription {}", source);
            file_get(source)
        }
    }
}

/// Split a `;` separated source list, ignoring blank entries
pub fn split_sources(list: &str) -> Vec<String> {
    list.split(';')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
