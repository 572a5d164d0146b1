use std::collections::HashMap;

/// Scheme-specific key/value pairs produced by an explode parser.
///
/// Keys differ per scheme (`method`/`password` for ss, raw JSON keys for
/// vmess, ...). Values are kept as text; numeric coercion happens later.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemeAttributes {
    values: HashMap<String, String>,
}

impl SchemeAttributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Like [`get`](Self::get) but treats an empty value as absent
    pub fn get_non_empty(&self, key: &str) -> Option<&str> {
        self.get(key).filter(|v| !v.is_empty())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for SchemeAttributes {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut attrs = SchemeAttributes::new();
        for (k, v) in iter {
            attrs.insert(k, v);
        }
        attrs
    }
}
