//! Error types shared by the parsing and conversion layers

use thiserror::Error;

/// Failure to turn a Base64 token into text.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum DecodeError {
    #[error("invalid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("decoded bytes are not valid UTF-8")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// A single raw link that could not be exploded into attributes.
///
/// These never abort a batch; the offending link is logged and dropped.
#[derive(Error, Debug)]
pub enum LinkError {
    #[error("link body is empty")]
    Empty,

    #[error("link does not start with {0}")]
    WrongScheme(&'static str),

    #[error("malformed link: {0}")]
    Malformed(String),

    #[error("expected {expected} fields, found {found}")]
    FieldCount { expected: usize, found: usize },

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error("invalid JSON payload: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failure while mapping scheme attributes onto a Clash proxy record.
///
/// A conversion error poisons the batch of the source it came from.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConvertError {
    #[error("missing required field `{0}`")]
    MissingField(&'static str),

    #[error("field `{field}` is not a valid number: {value:?}")]
    InvalidNumber { field: &'static str, value: String },
}

/// A subscription source or base document that could not be read.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot fetch {url}: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} answered with status {status}")]
    Status { url: String, status: u16 },

    #[error("invalid YAML document: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Failure while turning one subscription source into proxies.
#[derive(Error, Debug)]
pub enum SubscriptionError {
    #[error(transparent)]
    Source(#[from] SourceError),

    #[error(transparent)]
    Convert(#[from] ConvertError),

    #[error("invalid Clash document: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// A settings file that could not be loaded.
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("cannot read settings file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid TOML settings: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid YAML settings: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
