use anyhow::Context;
use clap::Parser;
use env_logger::Env;
use log::info;

use submerge::interfaces::run;
use submerge::parser::source::split_sources;
use submerge::Settings;

/// Merge proxy subscriptions into a single Clash configuration
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the settings file (TOML or YAML)
    #[arg(short, long, value_name = "FILE")]
    config: Option<String>,

    /// Subscription sources, separated by `;`
    #[arg(short, long, value_name = "SOURCES")]
    url: Option<String>,

    /// Base Clash configuration to merge proxies into
    #[arg(short, long, value_name = "FILE")]
    base: Option<String>,

    /// Output file path
    #[arg(short, long, value_name = "OUTPUT_FILE")]
    output: Option<String>,

    /// Let the first link of a source decide the scheme of every link in it
    #[arg(long)]
    first_line_sniffing: bool,
}

impl Args {
    /// Command line values take precedence over the settings file
    fn apply(self, settings: &mut Settings) {
        if let Some(url) = self.url {
            settings.sources = split_sources(&url);
        }
        if let Some(base) = self.base {
            settings.base_config = Some(base);
        }
        if let Some(output) = self.output {
            settings.output = output;
        }
        if self.first_line_sniffing {
            settings.detect_scheme_per_link = false;
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut settings = match args.config.as_deref() {
        Some(path) => Settings::load_from_file(path)
            .with_context(|| format!("failed to load settings from {}", path))?,
        None => Settings::default(),
    };
    args.apply(&mut settings);

    env_logger::init_from_env(Env::default().default_filter_or(settings.log_level.as_str()));

    info!("Writing merged configuration to {}", settings.output);
    // the returned error is printed once by the runtime
    run(&settings)
}
