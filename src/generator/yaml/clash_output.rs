use std::collections::BTreeMap;

use serde::Serialize;
use serde_yaml::{Mapping, Value};

use crate::models::ProxyType;

/// Options for the `obfs` simple-obfs plugin of a Shadowsocks node
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PluginOpts {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
}

/// A proxy record as written to the `proxies` list of a Clash configuration.
///
/// Optional fields are skipped entirely when `None`; Clash rejects keys with
/// null values. Field order here is the key order of the emitted YAML.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct ClashProxy {
    pub name: String,
    #[serde(rename = "type")]
    pub proxy_type: ProxyType,
    pub server: String,
    pub port: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,
    #[serde(rename = "alterId", skip_serializing_if = "Option::is_none")]
    pub alter_id: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cipher: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protocol_param: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub obfs: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub obfs_param: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plugin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plugin_opts: Option<PluginOpts>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tls: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ws_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ws_headers: Option<BTreeMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sni: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip_cert_verify: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub udp: Option<bool>,
}

impl ClashProxy {
    /// Create a record with only the mandatory fields set
    pub fn new(
        name: impl Into<String>,
        proxy_type: ProxyType,
        server: impl Into<String>,
        port: u16,
    ) -> Self {
        Self {
            name: name.into(),
            proxy_type,
            server: server.into(),
            port,
            uuid: None,
            alter_id: None,
            cipher: None,
            password: None,
            protocol: None,
            protocol_param: None,
            obfs: None,
            obfs_param: None,
            plugin: None,
            plugin_opts: None,
            network: None,
            tls: None,
            ws_path: None,
            ws_headers: None,
            sni: None,
            skip_cert_verify: None,
            udp: None,
        }
    }
}

/// One element of the `proxies` list.
///
/// Records decoded from links are typed; entries lifted from an existing
/// Clash document keep whatever shape they arrived in. `Verbatim` holds base
/// document entries that are not mappings at all.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ProxyEntry {
    Node(ClashProxy),
    Passthrough(Mapping),
    Verbatim(Value),
}

impl ProxyEntry {
    pub fn name(&self) -> Option<&str> {
        match self {
            ProxyEntry::Node(proxy) => Some(proxy.name.as_str()),
            ProxyEntry::Passthrough(map) => map.get("name").and_then(|v| v.as_str()),
            ProxyEntry::Verbatim(_) => None,
        }
    }
}

impl From<ClashProxy> for ProxyEntry {
    fn from(proxy: ClashProxy) -> Self {
        ProxyEntry::Node(proxy)
    }
}
