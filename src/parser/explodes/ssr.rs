use log::debug;

use crate::error::LinkError;
use crate::models::SchemeAttributes;
use crate::utils::base64::url_safe_base64_decode;

/// Number of `:` separated fields in a decoded SSR payload
const SSR_FIELDS: usize = 6;

/// Parse a ShadowsocksR link into its attributes
///
/// The payload is `BASE64URL(server:port:protocol:method:obfs:BASE64URL(password)/?params)`
/// where every `params` value is itself Base64url encoded. Produces `server`,
/// `port`, `protocol`, `method`, `obfs`, `password` and the decoded params
/// (`obfsparam`, `protoparam`, `remarks`, `group`, ...).
pub fn explode_ssr(ssr: &str) -> Result<SchemeAttributes, LinkError> {
    let encoded = ssr
        .strip_prefix("ssr://")
        .ok_or(LinkError::WrongScheme("ssr://"))?
        .trim();
    if encoded.is_empty() {
        return Err(LinkError::Empty);
    }

    let decoded = url_safe_base64_decode(encoded)?;
    let parts: Vec<&str> = decoded.split(':').collect();
    if parts.len() != SSR_FIELDS {
        return Err(LinkError::FieldCount {
            expected: SSR_FIELDS,
            found: parts.len(),
        });
    }

    let mut info = SchemeAttributes::new();
    info.insert("server", parts[0]);
    info.insert("port", parts[1]);
    info.insert("protocol", parts[2]);
    info.insert("method", parts[3]);
    info.insert("obfs", parts[4]);

    let (password, params) = match parts[5].split_once("/?") {
        Some((password, params)) => (password, params),
        None => (parts[5], ""),
    };
    info.insert("password", url_safe_base64_decode(password)?);

    for param in params.split('&').filter(|p| !p.is_empty()) {
        let Some((key, value)) = param.split_once('=') else {
            continue;
        };
        match url_safe_base64_decode(value) {
            Ok(value) => info.insert(key, value),
            Err(e) => debug!("Ignoring undecodable SSR param {}: {}", key, e),
        }
    }

    Ok(info)
}
