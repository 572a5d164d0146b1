use log::warn;
use serde_yaml::{Mapping, Value};

use super::clash_output::ProxyEntry;
use crate::models::ProxyBatch;

const PROXIES_KEY: &str = "proxies";

/// A Clash configuration document.
///
/// Keys other than `proxies` are kept verbatim and in their original order;
/// `proxies` is written back at the position it held in the base document,
/// or appended last when the base had none. Existing `proxies` entries are
/// all kept in place, including ones that are not mappings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigDocument {
    root: Mapping,
    proxies: Vec<ProxyEntry>,
}

impl ConfigDocument {
    /// An empty document holding only an empty `proxies` list
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a base document from YAML text
    ///
    /// Existing `proxies` entries are kept as passthrough entries; entries
    /// that are not mappings are carried along unchanged.
    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        let root = match serde_yaml::from_str::<Value>(content)? {
            Value::Mapping(map) => map,
            Value::Null => Mapping::new(),
            _ => {
                return Err(serde::de::Error::custom(
                    "configuration document must be a mapping",
                ))
            }
        };

        let proxies = match root.get(PROXIES_KEY) {
            Some(Value::Sequence(seq)) => seq
                .iter()
                .map(|entry| match entry {
                    Value::Mapping(map) => ProxyEntry::Passthrough(map.clone()),
                    other => {
                        warn!("Keeping non-mapping entry in base proxies as-is");
                        ProxyEntry::Verbatim(other.clone())
                    }
                })
                .collect(),
            _ => Vec::new(),
        };

        Ok(ConfigDocument { root, proxies })
    }

    pub fn proxies(&self) -> &[ProxyEntry] {
        &self.proxies
    }

    /// Build the full YAML tree with `proxies` in place
    pub fn to_value(&self) -> Result<Value, serde_yaml::Error> {
        let proxies = serde_yaml::to_value(&self.proxies)?;
        let mut out = Mapping::new();
        let mut placed = false;

        for (key, value) in &self.root {
            if key.as_str() == Some(PROXIES_KEY) {
                out.insert(key.clone(), proxies.clone());
                placed = true;
            } else {
                out.insert(key.clone(), value.clone());
            }
        }
        if !placed {
            out.insert(Value::from(PROXIES_KEY), proxies);
        }

        Ok(Value::Mapping(out))
    }

    /// Serialize in block style, keys in insertion order, Unicode kept as-is
    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(&self.to_value()?)
    }
}

/// Merge a batch into a document
///
/// Existing proxies come first, then the batch in its own order.
pub fn attach(batch: ProxyBatch, mut doc: ConfigDocument) -> ConfigDocument {
    if doc.proxies.is_empty() {
        doc.proxies = batch.into_proxies();
    } else {
        doc.proxies.extend(batch.into_proxies());
    }
    doc
}
