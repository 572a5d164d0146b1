use crate::error::LinkError;
use crate::models::SchemeAttributes;
use crate::utils::base64::url_safe_base64_decode;
use crate::utils::url::url_decode;

use super::common::split_host_port;

/// Parse a Shadowsocks link into its attributes
///
/// Accepted shapes, each with an optional `#remark` and `/?plugin=...` suffix:
/// - `ss://method:password@server:port`
/// - `ss://BASE64URL(method:password)@server:port`
/// - `ss://BASE64URL(method:password@server:port)`
///
/// Produces `name`, `method`, `password`, `server`, `port` plus every
/// `key=value` pair of the plugin options.
pub fn explode_ss(ss: &str) -> Result<SchemeAttributes, LinkError> {
    let content = ss.strip_prefix("ss://").ok_or(LinkError::WrongScheme("ss://"))?;
    if content.trim().is_empty() {
        return Err(LinkError::Empty);
    }

    let mut info = SchemeAttributes::new();
    let mut content = content.trim();
    if let Some((rest, remark)) = content.split_once('#') {
        info.insert("name", url_decode(remark));
        content = rest;
    }

    // Some clients emit `?plugin=` without the slash
    let content = content.replace("/?", "?");
    let mut param = content.as_str();

    if let Some((rest, plugin)) = param.split_once('?') {
        for option in url_decode(plugin).split(';') {
            if let Some((key, value)) = option.split_once('=') {
                info.insert(key, value);
            }
        }
        param = rest;
    }

    match param.split_once('@') {
        Some((userinfo, host_port)) => {
            let (server, port) = split_host_port(host_port)?;
            let secret = if userinfo.contains(':') {
                url_decode(userinfo)
            } else {
                url_safe_base64_decode(userinfo)?
            };
            let (method, password) = secret
                .split_once(':')
                .ok_or_else(|| LinkError::Malformed("userinfo lacks `method:password`".into()))?;

            info.insert("method", method);
            info.insert("password", password);
            info.insert("server", server);
            info.insert("port", port);
        }
        None => {
            let decoded = url_safe_base64_decode(param)?;
            let (method, rest) = decoded
                .split_once(':')
                .ok_or_else(|| LinkError::Malformed("payload lacks `method:`".into()))?;
            let (password, host_port) = rest
                .rsplit_once('@')
                .ok_or_else(|| LinkError::Malformed("payload lacks `@server:port`".into()))?;
            let (server, port) = split_host_port(host_port)?;

            info.insert("method", method);
            info.insert("password", password);
            info.insert("server", server);
            info.insert("port", port);
        }
    }

    Ok(info)
}
