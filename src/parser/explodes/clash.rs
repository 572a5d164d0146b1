use log::{info, warn};
use serde_yaml::{Mapping, Value};

use crate::models::ProxyBatch;

/// Legacy SSR keys and their Clash spelling
const RENAMED_KEYS: [(&str, &str); 2] = [
    ("protocolparam", "protocol-param"),
    ("obfsparam", "obfs-param"),
];

/// Parse a Clash YAML configuration and lift its `proxies` into a batch
///
/// Entries are already in Clash shape and are kept as-is except that:
/// - `name` is trimmed, and entries without a name are dropped
/// - `protocolparam` / `obfsparam` are renamed in place
/// - `udp` is forced to `true`
/// - keys holding `null` are removed
///
/// A document without a `proxies` list yields an empty batch.
pub fn explode_clash(content: &str) -> Result<ProxyBatch, serde_yaml::Error> {
    let yaml: Value = serde_yaml::from_str(content)?;
    let mut batch = ProxyBatch::new();

    let proxies = match yaml.get("proxies") {
        Some(Value::Sequence(seq)) => seq,
        _ => {
            warn!("No `proxies` list found in Clash document");
            return Ok(batch);
        }
    };

    for proxy in proxies {
        let Value::Mapping(map) = proxy else {
            warn!("Skipping Clash proxy entry that is not a mapping");
            continue;
        };
        match parse_clash_proxy(map) {
            Some((name, entry)) => batch.push_passthrough(name, entry),
            None => warn!("Skipping Clash proxy without a name"),
        }
    }

    info!("Found {} usable Clash nodes", batch.len());
    Ok(batch)
}

/// Rewrite a single proxy mapping, returning its trimmed name and the new entry
fn parse_clash_proxy(map: &Mapping) -> Option<(String, Mapping)> {
    let mut entry = Mapping::new();
    let mut name = None;

    for (key, value) in map {
        if value.is_null() {
            continue;
        }
        match key.as_str() {
            Some("name") => {
                let trimmed = value.as_str()?.trim().to_string();
                if trimmed.is_empty() {
                    return None;
                }
                entry.insert(key.clone(), Value::String(trimmed.clone()));
                name = Some(trimmed);
            }
            Some("udp") => {
                entry.insert(key.clone(), Value::Bool(true));
            }
            Some(k) => {
                let renamed = RENAMED_KEYS
                    .iter()
                    .find(|(from, _)| *from == k)
                    .map(|(_, to)| Value::from(*to))
                    .unwrap_or_else(|| key.clone());
                entry.insert(renamed, value.clone());
            }
            None => {
                entry.insert(key.clone(), value.clone());
            }
        }
    }

    if !entry.contains_key("udp") {
        entry.insert(Value::from("udp"), Value::Bool(true));
    }

    name.map(|name| (name, entry))
}
