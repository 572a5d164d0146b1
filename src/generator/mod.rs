pub mod exports;
pub mod yaml;

// Re-export the converter and the document assembler
pub use exports::proxy_to_clash::{proxy_to_clash, ConvertSettings};
pub use yaml::clash::{attach, ConfigDocument};
