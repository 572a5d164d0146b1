//! Conversion of exploded link attributes into Clash proxy records

use std::collections::BTreeMap;

use log::{debug, info, warn};

use crate::error::ConvertError;
use crate::generator::yaml::clash_output::{ClashProxy, PluginOpts};
use crate::models::{ProxyBatch, ProxyType, SchemeAttributes};

/// Remark prefixes providers use for informational entries ("remaining
/// traffic" and "expiry"); such nodes are not real proxies.
pub const DEFAULT_PLACEHOLDER_PREFIXES: [&str; 2] = ["剩余流量", "过期时间"];

/// Knobs for the attribute → Clash conversion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertSettings {
    pub placeholder_prefixes: Vec<String>,
}

impl Default for ConvertSettings {
    fn default() -> Self {
        ConvertSettings {
            placeholder_prefixes: DEFAULT_PLACEHOLDER_PREFIXES
                .iter()
                .map(|p| p.to_string())
                .collect(),
        }
    }
}

impl ConvertSettings {
    pub fn is_placeholder(&self, name: &str) -> bool {
        self.placeholder_prefixes
            .iter()
            .any(|prefix| !prefix.is_empty() && name.starts_with(prefix.as_str()))
    }
}

/// Convert a batch of attributes of one scheme into Clash records
///
/// Records filtered out by a scheme's rules are dropped silently and records
/// lacking a required field are skipped with a warning. A field that cannot
/// be coerced (e.g. a non-numeric port) fails the whole batch.
pub fn proxy_to_clash(
    proxy_type: ProxyType,
    items: &[SchemeAttributes],
    settings: &ConvertSettings,
) -> Result<ProxyBatch, ConvertError> {
    let mut batch = ProxyBatch::new();

    for item in items {
        let converted = match proxy_type {
            ProxyType::Shadowsocks => ss_to_clash(item).map(Some),
            ProxyType::ShadowsocksR => ssr_to_clash(item, settings),
            ProxyType::VMess => vmess_to_clash(item),
            ProxyType::Trojan => trojan_to_clash(item, settings),
        };
        match converted {
            Ok(Some(node)) => batch.push_node(node),
            Ok(None) => {}
            Err(ConvertError::MissingField(field)) => {
                warn!("Skipping {} node without `{}`", proxy_type, field);
            }
            Err(e) => return Err(e),
        }
    }

    info!("Converted {} usable {} nodes", batch.len(), proxy_type);
    Ok(batch)
}

/// Shadowsocks: every record is kept
pub fn ss_to_clash(item: &SchemeAttributes) -> Result<ClashProxy, ConvertError> {
    let server = required(item, "server")?;
    let port = parse_port(item.get("port"))?;
    let name = trimmed_name(item.get("name")).unwrap_or_else(|| fallback_name(&server, port));

    let mut proxy = ClashProxy::new(name, ProxyType::Shadowsocks, server, port);
    proxy.cipher = optional(item, "method");
    proxy.password = item.get("password").map(str::to_string);

    if item.get("plugin").is_some_and(|p| p.starts_with("obfs")) {
        proxy.plugin = Some("obfs".to_string());
        proxy.plugin_opts = Some(PluginOpts {
            mode: optional(item, "obfs"),
            host: optional(item, "obfs-host"),
        });
    }

    Ok(proxy)
}

/// ShadowsocksR: requires a remark and drops placeholder entries
pub fn ssr_to_clash(
    item: &SchemeAttributes,
    settings: &ConvertSettings,
) -> Result<Option<ClashProxy>, ConvertError> {
    let Some(name) = named_proxy(item.get("remarks"), settings) else {
        return Ok(None);
    };

    let server = required(item, "server")?;
    let port = parse_port(item.get("port"))?;

    let mut proxy = ClashProxy::new(name, ProxyType::ShadowsocksR, server, port);
    proxy.cipher = optional(item, "method");
    proxy.password = item.get("password").map(str::to_string);
    proxy.protocol = optional(item, "protocol");
    proxy.protocol_param = optional(item, "protoparam");
    proxy.obfs = optional(item, "obfs");
    proxy.obfs_param = optional(item, "obfsparam");
    proxy.udp = Some(true);

    Ok(Some(proxy))
}

/// VMess: skips all-empty placeholders and requires `aid`
pub fn vmess_to_clash(item: &SchemeAttributes) -> Result<Option<ClashProxy>, ConvertError> {
    if ["ps", "add", "port", "id", "aid"]
        .iter()
        .all(|key| !item.contains_key(key))
    {
        debug!("Skipping VMess placeholder without any node fields");
        return Ok(None);
    }

    let Some(aid) = item.get("aid") else {
        debug!("Skipping VMess node without alterId");
        return Ok(None);
    };

    let server = required(item, "add")?;
    let port = parse_port(item.get("port"))?;
    let name = trimmed_name(item.get("ps")).unwrap_or_else(|| fallback_name(&server, port));

    let mut proxy = ClashProxy::new(name, ProxyType::VMess, server, port);
    proxy.uuid = item.get("id").map(str::to_string);
    proxy.alter_id = Some(parse_alter_id(aid)?);
    proxy.cipher = Some("auto".to_string());
    proxy.udp = Some(true);
    proxy.network = optional(item, "net");
    proxy.tls = (item.get("tls") == Some("tls")).then_some(true);
    proxy.ws_path = optional(item, "path");
    proxy.ws_headers = item
        .get_non_empty("host")
        .map(|host| BTreeMap::from([("Host".to_string(), host.to_string())]));

    Ok(Some(proxy))
}

/// Trojan: requires a remark and drops placeholder entries
pub fn trojan_to_clash(
    item: &SchemeAttributes,
    settings: &ConvertSettings,
) -> Result<Option<ClashProxy>, ConvertError> {
    let Some(name) = named_proxy(item.get("name"), settings) else {
        return Ok(None);
    };

    let server = required(item, "server")?;
    let port = parse_port(item.get("port"))?;

    let mut proxy = ClashProxy::new(name, ProxyType::Trojan, server, port);
    proxy.password = item.get("password").map(str::to_string);
    proxy.sni = optional(item, "sni");
    proxy.skip_cert_verify = item
        .get("allowInsecure")
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"));
    proxy.udp = Some(true);

    Ok(Some(proxy))
}

/// Trimmed, non-empty name that is not a provider placeholder
fn named_proxy(raw: Option<&str>, settings: &ConvertSettings) -> Option<String> {
    let Some(name) = trimmed_name(raw) else {
        debug!("Skipping node without a remark");
        return None;
    };
    if settings.is_placeholder(&name) {
        debug!("Skipping placeholder node {}", name);
        return None;
    }
    Some(name)
}

fn trimmed_name(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
}

fn fallback_name(server: &str, port: u16) -> String {
    format!("{} ({})", server, port)
}

fn optional(item: &SchemeAttributes, key: &str) -> Option<String> {
    item.get_non_empty(key).map(str::to_string)
}

fn required(item: &SchemeAttributes, key: &'static str) -> Result<String, ConvertError> {
    optional(item, key).ok_or(ConvertError::MissingField(key))
}

fn parse_port(raw: Option<&str>) -> Result<u16, ConvertError> {
    let raw = raw.ok_or(ConvertError::MissingField("port"))?;
    match raw.trim().parse::<u16>() {
        Ok(port) if port != 0 => Ok(port),
        _ => Err(ConvertError::InvalidNumber {
            field: "port",
            value: raw.to_string(),
        }),
    }
}

fn parse_alter_id(raw: &str) -> Result<u32, ConvertError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(0);
    }
    trimmed
        .parse::<u32>()
        .map_err(|_| ConvertError::InvalidNumber {
            field: "aid",
            value: raw.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attrs(pairs: &[(&str, &str)]) -> SchemeAttributes {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_ss_to_clash_basic() {
        let proxy = ss_to_clash(&attrs(&[
            ("name", " MyNode "),
            ("method", "aes-256-gcm"),
            ("password", "password"),
            ("server", "1.2.3.4"),
            ("port", "8388"),
        ]))
        .unwrap();

        assert_eq!(proxy.name, "MyNode");
        assert_eq!(proxy.proxy_type, ProxyType::Shadowsocks);
        assert_eq!(proxy.server, "1.2.3.4");
        assert_eq!(proxy.port, 8388);
        assert_eq!(proxy.cipher.as_deref(), Some("aes-256-gcm"));
        assert_eq!(proxy.password.as_deref(), Some("password"));
        assert_eq!(proxy.plugin, None);
        assert_eq!(proxy.plugin_opts, None);
        assert_eq!(proxy.udp, None);
    }

    #[test]
    fn test_ss_to_clash_obfs_plugin() {
        let proxy = ss_to_clash(&attrs(&[
            ("method", "aes-128-gcm"),
            ("password", "pw"),
            ("server", "s.com"),
            ("port", "443"),
            ("plugin", "obfs-local"),
            ("obfs", "tls"),
        ]))
        .unwrap();

        assert_eq!(proxy.name, "s.com (443)");
        assert_eq!(proxy.plugin.as_deref(), Some("obfs"));
        assert_eq!(
            proxy.plugin_opts,
            Some(PluginOpts {
                mode: Some("tls".to_string()),
                host: None
            })
        );
    }

    #[test]
    fn test_ss_to_clash_non_obfs_plugin_is_ignored() {
        let proxy = ss_to_clash(&attrs(&[
            ("server", "s.com"),
            ("port", "443"),
            ("plugin", "v2ray-plugin"),
        ]))
        .unwrap();
        assert_eq!(proxy.plugin, None);
        assert_eq!(proxy.plugin_opts, None);
    }

    #[test]
    fn test_ss_to_clash_bad_port() {
        let err = ss_to_clash(&attrs(&[("server", "s.com"), ("port", "http")])).unwrap_err();
        assert_eq!(
            err,
            ConvertError::InvalidNumber {
                field: "port",
                value: "http".to_string()
            }
        );
        assert!(ss_to_clash(&attrs(&[("server", "s.com"), ("port", "0")])).is_err());
        assert!(ss_to_clash(&attrs(&[("server", "s.com"), ("port", "70000")])).is_err());
    }

    #[test]
    fn test_ssr_to_clash_fields() {
        let settings = ConvertSettings::default();
        let proxy = ssr_to_clash(
            &attrs(&[
                ("remarks", "HK 01 "),
                ("server", "hk.com"),
                ("port", "443"),
                ("protocol", "auth_aes128_md5"),
                ("method", "aes-256-cfb"),
                ("obfs", "tls1.2_ticket_auth"),
                ("password", "pw"),
                ("obfsparam", "cdn.com"),
                ("protoparam", ""),
            ]),
            &settings,
        )
        .unwrap()
        .unwrap();

        assert_eq!(proxy.name, "HK 01");
        assert_eq!(proxy.proxy_type, ProxyType::ShadowsocksR);
        assert_eq!(proxy.cipher.as_deref(), Some("aes-256-cfb"));
        assert_eq!(proxy.protocol.as_deref(), Some("auth_aes128_md5"));
        assert_eq!(proxy.obfs.as_deref(), Some("tls1.2_ticket_auth"));
        assert_eq!(proxy.obfs_param.as_deref(), Some("cdn.com"));
        assert_eq!(proxy.protocol_param, None);
        assert_eq!(proxy.udp, Some(true));
    }

    #[test]
    fn test_ssr_to_clash_filters_placeholders_and_nameless() {
        let settings = ConvertSettings::default();
        let base = [("server", "x.com"), ("port", "1")];

        for remark in ["剩余流量：10GB", "过期时间：2024-01-01", "  剩余流量 5G"] {
            let mut item = attrs(&base);
            item.insert("remarks", remark);
            assert_eq!(ssr_to_clash(&item, &settings).unwrap(), None);
        }
        assert_eq!(ssr_to_clash(&attrs(&base), &settings).unwrap(), None);

        let mut item = attrs(&base);
        item.insert("remarks", "流量剩余不是前缀");
        assert!(ssr_to_clash(&item, &settings).unwrap().is_some());
    }

    #[test]
    fn test_placeholder_filter_runs_before_coercion() {
        let settings = ConvertSettings::default();
        let item = attrs(&[("remarks", "过期时间"), ("server", "x"), ("port", "bad")]);
        assert_eq!(ssr_to_clash(&item, &settings).unwrap(), None);
    }

    #[test]
    fn test_custom_placeholder_prefixes() {
        let settings = ConvertSettings {
            placeholder_prefixes: vec!["Expire".to_string()],
        };
        assert!(settings.is_placeholder("Expire: 2030"));
        assert!(!settings.is_placeholder("剩余流量"));
    }

    #[test]
    fn test_vmess_to_clash_ws_tls() {
        let proxy = vmess_to_clash(&attrs(&[
            ("ps", "N1"),
            ("add", "a.com"),
            ("port", "443"),
            ("id", "u1"),
            ("aid", "0"),
            ("net", "ws"),
            ("tls", "tls"),
            ("path", "/p"),
            ("host", "h.com"),
        ]))
        .unwrap()
        .unwrap();

        assert_eq!(proxy.name, "N1");
        assert_eq!(proxy.server, "a.com");
        assert_eq!(proxy.port, 443);
        assert_eq!(proxy.uuid.as_deref(), Some("u1"));
        assert_eq!(proxy.alter_id, Some(0));
        assert_eq!(proxy.cipher.as_deref(), Some("auto"));
        assert_eq!(proxy.network.as_deref(), Some("ws"));
        assert_eq!(proxy.tls, Some(true));
        assert_eq!(proxy.ws_path.as_deref(), Some("/p"));
        assert_eq!(
            proxy.ws_headers,
            Some(BTreeMap::from([("Host".to_string(), "h.com".to_string())]))
        );
        assert_eq!(proxy.udp, Some(true));
    }

    #[test]
    fn test_vmess_to_clash_omits_absent_fields() {
        let proxy = vmess_to_clash(&attrs(&[
            ("add", "a.com"),
            ("port", "80"),
            ("id", "u1"),
            ("aid", "2"),
            ("tls", "none"),
            ("host", ""),
            ("path", ""),
        ]))
        .unwrap()
        .unwrap();

        assert_eq!(proxy.name, "a.com (80)");
        assert_eq!(proxy.alter_id, Some(2));
        assert_eq!(proxy.tls, None);
        assert_eq!(proxy.ws_headers, None);
        assert_eq!(proxy.ws_path, None);
        assert_eq!(proxy.network, None);
    }

    #[test]
    fn test_vmess_to_clash_requires_aid() {
        let item = attrs(&[("ps", "N1"), ("add", "a.com"), ("port", "443"), ("id", "u1")]);
        assert_eq!(vmess_to_clash(&item).unwrap(), None);
    }

    #[test]
    fn test_vmess_to_clash_skips_placeholder() {
        let item = attrs(&[("v", "2"), ("net", "tcp")]);
        assert_eq!(vmess_to_clash(&item).unwrap(), None);
    }

    #[test]
    fn test_vmess_to_clash_bad_alter_id() {
        let item = attrs(&[("add", "a.com"), ("port", "443"), ("aid", "x")]);
        assert!(matches!(
            vmess_to_clash(&item),
            Err(ConvertError::InvalidNumber { field: "aid", .. })
        ));
    }

    #[test]
    fn test_trojan_to_clash() {
        let settings = ConvertSettings::default();
        let proxy = trojan_to_clash(
            &attrs(&[
                ("name", "JP"),
                ("password", "pw"),
                ("server", "jp.com"),
                ("port", "443"),
                ("allowInsecure", "1"),
                ("sni", "cdn.jp.com"),
            ]),
            &settings,
        )
        .unwrap()
        .unwrap();

        assert_eq!(proxy.proxy_type, ProxyType::Trojan);
        assert_eq!(proxy.port, 443);
        assert_eq!(proxy.password.as_deref(), Some("pw"));
        assert_eq!(proxy.sni.as_deref(), Some("cdn.jp.com"));
        assert_eq!(proxy.skip_cert_verify, Some(true));
        assert_eq!(proxy.udp, Some(true));
    }

    #[test]
    fn test_trojan_to_clash_filters() {
        let settings = ConvertSettings::default();
        let item = attrs(&[("name", "剩余流量：1G"), ("server", "a"), ("port", "1")]);
        assert_eq!(trojan_to_clash(&item, &settings).unwrap(), None);
        let item = attrs(&[("server", "a"), ("port", "1")]);
        assert_eq!(trojan_to_clash(&item, &settings).unwrap(), None);
    }

    #[test]
    fn test_proxy_to_clash_batch() {
        let settings = ConvertSettings::default();
        let items = vec![
            attrs(&[("ps", "a"), ("add", "a.com"), ("port", "1"), ("aid", "0")]),
            attrs(&[("ps", "b"), ("add", "b.com"), ("port", "2")]),
            attrs(&[("ps", "c"), ("add", "c.com"), ("port", "3"), ("aid", "0")]),
        ];
        let batch = proxy_to_clash(ProxyType::VMess, &items, &settings).unwrap();
        assert_eq!(batch.names(), &["a", "c"]);

        let items = vec![attrs(&[("ps", "d"), ("add", "d.com"), ("port", "x"), ("aid", "0")])];
        assert!(proxy_to_clash(ProxyType::VMess, &items, &settings).is_err());
    }

    #[test]
    fn test_proxy_to_clash_skips_node_missing_server() {
        let settings = ConvertSettings::default();
        let items = vec![
            attrs(&[("ps", "a"), ("add", "a.com"), ("port", "1"), ("aid", "0")]),
            attrs(&[("ps", "b"), ("add", ""), ("port", "2"), ("aid", "0")]),
            attrs(&[("ps", "c"), ("port", "3"), ("aid", "0")]),
            attrs(&[("ps", "d"), ("add", "d.com"), ("aid", "0")]),
            attrs(&[("ps", "e"), ("add", "e.com"), ("port", "5"), ("aid", "0")]),
        ];
        let batch = proxy_to_clash(ProxyType::VMess, &items, &settings).unwrap();
        assert_eq!(batch.names(), &["a", "e"]);

        let items = vec![
            attrs(&[("name", "t"), ("port", "443"), ("password", "pw")]),
            attrs(&[("name", "u"), ("server", "u.com"), ("port", "443")]),
        ];
        let batch = proxy_to_clash(ProxyType::Trojan, &items, &settings).unwrap();
        assert_eq!(batch.names(), &["u"]);
    }
}
