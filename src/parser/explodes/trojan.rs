use crate::error::LinkError;
use crate::models::SchemeAttributes;
use crate::utils::url::url_decode;

use super::common::split_host_port;

/// Parse a Trojan link into its attributes
///
/// Shape: `trojan://password@server:port?allowInsecure=<v>&sni=<v>#remark`.
/// Produces `name`, `password`, `server`, `port`, `allowInsecure` and `sni`.
/// Links without an `@` are rejected; there is no encoded variant.
pub fn explode_trojan(trojan: &str) -> Result<SchemeAttributes, LinkError> {
    let content = trojan
        .strip_prefix("trojan://")
        .ok_or(LinkError::WrongScheme("trojan://"))?
        .trim();
    if content.is_empty() {
        return Err(LinkError::Empty);
    }

    let mut info = SchemeAttributes::new();
    let mut param = content;
    if let Some((rest, remark)) = param.split_once('#') {
        info.insert("name", url_decode(remark));
        param = rest;
    }

    if !param.contains('@') {
        return Err(LinkError::Malformed("missing `@` separator".into()));
    }

    // the password runs up to the last `@` and may itself hold `?` or `@`
    let (password, rest) = param
        .rsplit_once('@')
        .ok_or_else(|| LinkError::Malformed("missing `@` before server".into()))?;
    let (host_port, query) = rest
        .split_once('?')
        .ok_or_else(|| LinkError::Malformed("missing query string".into()))?;
    let (server, port) = split_host_port(host_port)?;

    let (allow_insecure, sni) = query
        .strip_prefix("allowInsecure=")
        .and_then(|q| q.rsplit_once("&sni="))
        .ok_or_else(|| {
            LinkError::Malformed("query is not `allowInsecure=<v>&sni=<v>`".into())
        })?;

    info.insert("password", password);
    info.insert("server", server);
    info.insert("port", port);
    info.insert("allowInsecure", allow_insecure);
    info.insert("sni", sni);

    Ok(info)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explode_trojan_full_link() {
        let info = explode_trojan(
            "trojan://p4ss@example.com:443?allowInsecure=1&sni=cdn.example.com#%F0%9F%87%AF%F0%9F%87%B5%20JP",
        )
        .unwrap();

        assert_eq!(info.get("name"), Some("🇯🇵 JP"));
        assert_eq!(info.get("password"), Some("p4ss"));
        assert_eq!(info.get("server"), Some("example.com"));
        assert_eq!(info.get("port"), Some("443"));
        assert_eq!(info.get("allowInsecure"), Some("1"));
        assert_eq!(info.get("sni"), Some("cdn.example.com"));
    }

    #[test]
    fn test_explode_trojan_password_with_at() {
        let info = explode_trojan("trojan://a@b@1.2.3.4:8443?allowInsecure=0&sni=x.org").unwrap();
        assert_eq!(info.get("password"), Some("a@b"));
        assert_eq!(info.get("server"), Some("1.2.3.4"));
        assert_eq!(info.get("port"), Some("8443"));
        assert!(!info.contains_key("name"));
    }

    #[test]
    fn test_explode_trojan_password_with_question_mark() {
        let info =
            explode_trojan("trojan://pa?ss@h.com:443?allowInsecure=0&sni=h.com#N").unwrap();
        assert_eq!(info.get("password"), Some("pa?ss"));
        assert_eq!(info.get("server"), Some("h.com"));
        assert_eq!(info.get("port"), Some("443"));
        assert_eq!(info.get("sni"), Some("h.com"));
        assert_eq!(info.get("name"), Some("N"));
    }

    #[test]
    fn test_explode_trojan_trailing_slash_port() {
        let info = explode_trojan("trojan://pw@h.com:443/?allowInsecure=0&sni=h.com#n").unwrap();
        assert_eq!(info.get("port"), Some("443"));
    }

    #[test]
    fn test_explode_trojan_rejects_other_shapes() {
        assert!(matches!(explode_trojan("trojan://"), Err(LinkError::Empty)));
        assert!(matches!(explode_trojan("trojan:// \t"), Err(LinkError::Empty)));
        // no `@`
        assert!(explode_trojan("trojan://cGFzc3dvcmQ#node").is_err());
        // query parameters in another order
        assert!(explode_trojan("trojan://pw@h.com:443?sni=h.com&allowInsecure=1").is_err());
        // no query at all
        assert!(explode_trojan("trojan://pw@h.com:443#node").is_err());
    }
}
