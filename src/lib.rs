pub mod error;
pub mod generator;
pub mod interfaces;
pub mod models;
pub mod parser;
pub mod settings;
pub mod utils;

pub use generator::yaml::clash::ConfigDocument;
pub use generator::yaml::clash_output::{ClashProxy, ProxyEntry};
pub use models::{ProxyBatch, ProxyType, SchemeAttributes};
pub use settings::Settings;
