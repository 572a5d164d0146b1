//! Proxy type definitions
//!
//! The four link schemes understood by the explode parsers, and the Clash
//! `type` tag each one maps to.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Represents the type of a proxy.
///
/// Used both to detect the scheme of a raw link and as the `type` field of
/// the emitted Clash record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProxyType {
    #[serde(rename = "ss")]
    Shadowsocks,
    #[serde(rename = "ssr")]
    ShadowsocksR,
    #[serde(rename = "vmess")]
    VMess,
    #[serde(rename = "trojan")]
    Trojan,
}

impl ProxyType {
    pub const ALL: [ProxyType; 4] = [
        ProxyType::Shadowsocks,
        ProxyType::ShadowsocksR,
        ProxyType::VMess,
        ProxyType::Trojan,
    ];

    /// The link prefix including `://`
    pub fn prefix(self) -> &'static str {
        match self {
            ProxyType::Shadowsocks => "ss://",
            ProxyType::ShadowsocksR => "ssr://",
            ProxyType::VMess => "vmess://",
            ProxyType::Trojan => "trojan://",
        }
    }

    /// Detects the scheme of a raw link from its own prefix.
    pub fn from_link(link: &str) -> Option<ProxyType> {
        let link = link.trim_start();
        ProxyType::ALL
            .into_iter()
            .find(|t| link.starts_with(t.prefix()))
    }
}

/// Converts a `ProxyType` into a human-readable name.
impl fmt::Display for ProxyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ProxyType::Shadowsocks => "SS",
            ProxyType::ShadowsocksR => "SSR",
            ProxyType::VMess => "VMess",
            ProxyType::Trojan => "Trojan",
        };
        f.write_str(name)
    }
}
