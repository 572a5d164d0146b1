use log::{debug, info, warn};

use crate::error::LinkError;
use crate::models::{ProxyType, SchemeAttributes};

/// Explode a single link of a known type into its attributes
pub fn explode_with(proxy_type: ProxyType, link: &str) -> Result<SchemeAttributes, LinkError> {
    let link = link.trim();
    match proxy_type {
        ProxyType::Shadowsocks => super::ss::explode_ss(link),
        ProxyType::ShadowsocksR => super::ssr::explode_ssr(link),
        ProxyType::VMess => super::vmess::explode_vmess(link),
        ProxyType::Trojan => super::trojan::explode_trojan(link),
    }
}

/// Decode a batch of links that all belong to `proxy_type`.
///
/// Malformed links are logged and skipped; the batch never fails as a whole.
pub fn decode(proxy_type: ProxyType, links: &[&str]) -> Vec<SchemeAttributes> {
    let mut attributes = Vec::with_capacity(links.len());

    for link in links {
        match explode_with(proxy_type, link) {
            Ok(info) => attributes.push(info),
            Err(LinkError::Empty) => info!("Skipping empty {} node", proxy_type),
            Err(e) => {
                warn!("Skipping malformed {} node: {}", proxy_type, e);
                debug!("Offending link: {}", link);
            }
        }
    }

    attributes
}

/// Split `server:port` at the last colon, dropping a trailing `/`
pub(crate) fn split_host_port(host_port: &str) -> Result<(&str, &str), LinkError> {
    let host_port = host_port.trim().trim_end_matches('/');
    match host_port.rsplit_once(':') {
        Some((server, port)) if !server.is_empty() && !port.is_empty() => Ok((server, port)),
        _ => Err(LinkError::Malformed(format!(
            "expected `server:port`, found {:?}",
            host_port
        ))),
    }
}
