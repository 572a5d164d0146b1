use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::{Proxy, StatusCode};

use crate::error::SourceError;

/// Default timeout for HTTP requests in seconds
pub const DEFAULT_TIMEOUT: u64 = 15;

/// Default user agent sent with subscription requests
pub const DEFAULT_USER_AGENT: &str = "submerge";

#[derive(Debug, Clone)]
pub struct HttpConfig {
    pub user_agent: String,
    pub timeout_secs: u64,
    /// Upstream proxy such as `http://127.0.0.1:8080`
    pub proxy: Option<String>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        HttpConfig {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: DEFAULT_TIMEOUT,
            proxy: None,
        }
    }
}

/// Builds a blocking client for the given configuration
pub fn build_client(config: &HttpConfig) -> Result<Client, reqwest::Error> {
    let mut client_builder = Client::builder()
        .timeout(Duration::from_secs(config.timeout_secs))
        .user_agent(config.user_agent.clone());

    if let Some(proxy) = config.proxy.as_deref().filter(|p| !p.is_empty()) {
        client_builder = client_builder.proxy(Proxy::all(proxy)?);
    }

    client_builder.build()
}

/// Makes a blocking GET request and returns the response body
///
/// # Arguments
/// * `client` - Client built with [`build_client`]
/// * `url` - The URL to request
///
/// # Returns
/// * `Ok(String)` - The response body as a string
/// * `Err(SourceError)` - The request failed or the server answered with a non-200 status
pub fn web_get(client: &Client, url: &str) -> Result<String, SourceError> {
    let response = client.get(url).send().map_err(|source| SourceError::Http {
        url: url.to_string(),
        source,
    })?;

    if response.status() != StatusCode::OK {
        return Err(SourceError::Status {
            url: url.to_string(),
            status: response.status().as_u16(),
        });
    }

    response.text().map_err(|source| SourceError::Http {
        url: url.to_string(),
        source,
    })
}
