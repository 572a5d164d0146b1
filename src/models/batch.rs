use serde_yaml::Mapping;

use crate::generator::yaml::clash_output::{ClashProxy, ProxyEntry};

/// An ordered run of converted proxies plus their names.
///
/// `names[i]` is always the name of `proxies[i]`; both only grow by push or
/// extend, so arrival order is kept. No deduplication happens here.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProxyBatch {
    proxies: Vec<ProxyEntry>,
    names: Vec<String>,
}

impl ProxyBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_node(&mut self, proxy: ClashProxy) {
        self.names.push(proxy.name.clone());
        self.proxies.push(ProxyEntry::Node(proxy));
    }

    pub fn push_passthrough(&mut self, name: String, entry: Mapping) {
        self.names.push(name);
        self.proxies.push(ProxyEntry::Passthrough(entry));
    }

    /// Appends another batch after this one
    pub fn extend(&mut self, other: ProxyBatch) {
        self.proxies.extend(other.proxies);
        self.names.extend(other.names);
    }

    pub fn proxies(&self) -> &[ProxyEntry] {
        &self.proxies
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.proxies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.proxies.is_empty()
    }

    pub fn into_proxies(self) -> Vec<ProxyEntry> {
        self.proxies
    }
}
