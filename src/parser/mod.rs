pub mod explodes;
pub mod parse_settings;
pub mod source;
pub mod subparser;

pub use parse_settings::ParseSettings;
pub use source::{DefaultSourceReader, SourceReader};
pub use subparser::{add_nodes, get_proxies};
