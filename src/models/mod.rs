//! Core data models shared by the parsing and generation layers
//!
//! ```rust
//! use submerge::models::{ProxyType, SchemeAttributes};
//!
//! let proxy_type = ProxyType::from_link("trojan://pw@example.com:443").unwrap();
//! assert_eq!(proxy_type, ProxyType::Trojan);
//!
//! let mut attrs = SchemeAttributes::new();
//! attrs.insert("server", "example.com");
//! assert_eq!(attrs.get("server"), Some("example.com"));
//! ```

mod attributes;
mod batch;
mod proxy;

pub use attributes::SchemeAttributes;
pub use batch::ProxyBatch;
pub use proxy::ProxyType;
