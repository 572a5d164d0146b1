use serde_json::Value;

use crate::error::LinkError;
use crate::models::SchemeAttributes;
use crate::utils::base64::base64_decode;

/// Parse a VMess link into its attributes
///
/// The link body is standard Base64 of a JSON object (`ps`, `add`, `port`,
/// `id`, `aid`, `net`, `tls`, `path`, `host`, ...). Keys are passed through
/// verbatim; numbers and booleans are kept as their text form and `null`
/// values are treated as absent.
pub fn explode_vmess(vmess: &str) -> Result<SchemeAttributes, LinkError> {
    let encoded = vmess
        .strip_prefix("vmess://")
        .ok_or(LinkError::WrongScheme("vmess://"))?
        .trim();
    if encoded.is_empty() {
        return Err(LinkError::Empty);
    }

    let decoded = base64_decode(encoded, false)?;
    let json: Value = serde_json::from_str(&decoded)?;
    let object = json
        .as_object()
        .ok_or_else(|| LinkError::Malformed("payload is not a JSON object".into()))?;

    let mut info = SchemeAttributes::new();
    for (key, value) in object {
        match value {
            Value::Null => {}
            Value::String(s) => info.insert(key.as_str(), s.as_str()),
            other => info.insert(key.as_str(), other.to_string()),
        }
    }

    Ok(info)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::base64::base64_encode;

    fn vmess_link(json: &str) -> String {
        format!("vmess://{}", base64_encode(json))
    }

    #[test]
    fn test_explode_vmess_string_fields() {
        let link = vmess_link(
            r#"{"ps":"N1","add":"a.com","port":"443","id":"u1","aid":"0","net":"ws","tls":"tls","path":"/p","host":"h.com"}"#,
        );
        let info = explode_vmess(&link).unwrap();

        assert_eq!(info.get("ps"), Some("N1"));
        assert_eq!(info.get("add"), Some("a.com"));
        assert_eq!(info.get("port"), Some("443"));
        assert_eq!(info.get("id"), Some("u1"));
        assert_eq!(info.get("aid"), Some("0"));
        assert_eq!(info.get("net"), Some("ws"));
        assert_eq!(info.get("tls"), Some("tls"));
        assert_eq!(info.get("path"), Some("/p"));
        assert_eq!(info.get("host"), Some("h.com"));
    }

    #[test]
    fn test_explode_vmess_numeric_and_null_fields() {
        let link = vmess_link(r#"{"v":2,"ps":"n","add":"b.com","port":8443,"aid":64,"host":null}"#);
        let info = explode_vmess(&link).unwrap();

        assert_eq!(info.get("v"), Some("2"));
        assert_eq!(info.get("port"), Some("8443"));
        assert_eq!(info.get("aid"), Some("64"));
        assert!(!info.contains_key("host"));
    }

    #[test]
    fn test_explode_vmess_unpadded() {
        // 10 bytes of JSON, so the encoding ends in `==`
        let link = vmess_link(r#"{"a":"bc"}"#);
        let trimmed = link.trim_end_matches('=');
        let info = explode_vmess(trimmed).unwrap();
        assert_eq!(info.get("a"), Some("bc"));
    }

    #[test]
    fn test_explode_vmess_invalid_payloads() {
        assert!(matches!(explode_vmess("vmess://"), Err(LinkError::Empty)));
        assert!(matches!(
            explode_vmess("vmess://not-base64!"),
            Err(LinkError::Decode(_))
        ));
        assert!(matches!(
            explode_vmess(&vmess_link("not json")),
            Err(LinkError::Json(_))
        ));
        assert!(matches!(
            explode_vmess(&vmess_link("[1,2]")),
            Err(LinkError::Malformed(_))
        ));
    }
}
