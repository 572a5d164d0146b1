pub mod subconverter;

pub use subconverter::{
    run, subconverter, write_document, SubconverterConfig, SubconverterConfigBuilder,
};
