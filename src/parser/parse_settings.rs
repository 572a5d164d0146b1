use crate::generator::exports::proxy_to_clash::ConvertSettings;

/// Controls how subscription sources are parsed and merged
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseSettings {
    /// Detect the scheme of every link on its own. When false, the first
    /// line of a source decides the scheme of the whole source.
    pub detect_scheme_per_link: bool,

    /// Log and skip unreadable sources instead of aborting the run
    pub skip_failed_links: bool,

    /// Settings for the attribute → Clash conversion
    pub convert: ConvertSettings,
}

impl Default for ParseSettings {
    fn default() -> Self {
        ParseSettings {
            detect_scheme_per_link: true,
            skip_failed_links: true,
            convert: ConvertSettings::default(),
        }
    }
}
