use log::{error, info, warn};

use crate::error::{ConvertError, DecodeError, SubscriptionError};
use crate::generator::exports::proxy_to_clash::proxy_to_clash;
use crate::models::{ProxyBatch, ProxyType};
use crate::parser::explodes::{decode, explode_clash};
use crate::parser::parse_settings::ParseSettings;
use crate::parser::source::SourceReader;
use crate::utils::base64::{base64_decode, url_safe_base64_decode};

/// Read every source in order and merge their proxies
///
/// # Arguments
/// * `sources` - Source identifiers (local paths or URLs)
/// * `reader` - Reader used to fetch each source
/// * `parse_settings` - Settings for parsing
///
/// # Returns
/// * `Ok(ProxyBatch)` with the proxies of all usable sources, in arrival order
/// * `Err(SubscriptionError)` when a source is unreadable and `skip_failed_links` is off
pub fn get_proxies(
    sources: &[String],
    reader: &dyn SourceReader,
    parse_settings: &ParseSettings,
) -> Result<ProxyBatch, SubscriptionError> {
    let mut all_nodes = ProxyBatch::new();

    for source in sources {
        info!("Processing subscription {}", source);
        match add_nodes(source, reader, parse_settings) {
            Ok(batch) => all_nodes.extend(batch),
            Err(SubscriptionError::Source(e)) if !parse_settings.skip_failed_links => {
                return Err(e.into());
            }
            Err(e) => error!("Dropping subscription {}: {}", source, e),
        }
    }

    info!("Found {} nodes in total", all_nodes.len());
    Ok(all_nodes)
}

/// Read a single source and convert its content
pub fn add_nodes(
    source: &str,
    reader: &dyn SourceReader,
    parse_settings: &ParseSettings,
) -> Result<ProxyBatch, SubscriptionError> {
    let content = reader.read(source)?;
    parse_subscription(&content, parse_settings)
}

/// Convert the raw content of one source
///
/// Base64 content is treated as a list of links. Otherwise the text is used
/// as a plain link list when its first line is a known link, and as a Clash
/// YAML document in every other case.
pub fn parse_subscription(
    content: &str,
    parse_settings: &ParseSettings,
) -> Result<ProxyBatch, SubscriptionError> {
    match decode_subscription(content) {
        Ok(decoded) => Ok(explode_links(&decoded, parse_settings)?),
        Err(e) => {
            info!("Subscription is not base64 ({}), trying other formats", e);
            if is_link_list(content) {
                Ok(explode_links(content, parse_settings)?)
            } else {
                info!("Extracting Clash nodes");
                Ok(explode_clash(content)?)
            }
        }
    }
}

/// Decode and convert newline separated links
pub fn explode_links(
    content: &str,
    parse_settings: &ParseSettings,
) -> Result<ProxyBatch, ConvertError> {
    let lines: Vec<&str> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    let mut batch = ProxyBatch::new();
    for (proxy_type, links) in group_by_scheme(&lines, parse_settings.detect_scheme_per_link) {
        let attributes = decode(proxy_type, &links);
        batch.extend(proxy_to_clash(
            proxy_type,
            &attributes,
            &parse_settings.convert,
        )?);
    }

    Ok(batch)
}

/// Split links into consecutive runs of the same scheme
///
/// With `per_link` off the first line decides for the whole source; an
/// unknown first line yields nothing.
fn group_by_scheme<'a>(lines: &[&'a str], per_link: bool) -> Vec<(ProxyType, Vec<&'a str>)> {
    if !per_link {
        let Some(first) = lines.first() else {
            return Vec::new();
        };
        return match ProxyType::from_link(first) {
            Some(proxy_type) => vec![(proxy_type, lines.to_vec())],
            None => {
                warn!("Unrecognized scheme on first line, skipping source");
                Vec::new()
            }
        };
    }

    let mut runs: Vec<(ProxyType, Vec<&'a str>)> = Vec::new();
    for &line in lines {
        let Some(proxy_type) = ProxyType::from_link(line) else {
            warn!("Skipping link with unrecognized scheme");
            continue;
        };
        if let Some((last, links)) = runs.last_mut() {
            if *last == proxy_type {
                links.push(line);
                continue;
            }
        }
        runs.push((proxy_type, vec![line]));
    }
    runs
}

fn decode_subscription(content: &str) -> Result<String, DecodeError> {
    let compact: String = content.chars().filter(|c| !c.is_whitespace()).collect();
    base64_decode(&compact, false).or_else(|_| url_safe_base64_decode(&compact))
}

fn is_link_list(content: &str) -> bool {
    content
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .and_then(ProxyType::from_link)
        .is_some()
}
