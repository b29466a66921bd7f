//! Harvest prefix strings from a RIPEstat announced-prefixes document.

use regex::Regex;
use serde::Deserialize;
use std::sync::OnceLock;

/// Regex for `"prefix": "<CIDR>"` fields anywhere in a document.
static PREFIX_REGEX: OnceLock<Regex> = OnceLock::new();

fn get_prefix_regex() -> &'static Regex {
    PREFIX_REGEX
        .get_or_init(|| Regex::new(r#""prefix"\s*:\s*"([^"]*)""#).expect("Invalid Regex"))
}

/// Response of the `announced-prefixes` data call (fields we use).
#[derive(Deserialize, Debug)]
pub struct AnnouncedPrefixesResponse {
    pub data: AnnouncedPrefixesData,
    pub status: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct AnnouncedPrefixesData {
    pub prefixes: Vec<AnnouncedPrefix>,
}

#[derive(Deserialize, Debug)]
pub struct AnnouncedPrefix {
    pub prefix: String,
}

/// Extract the announced prefix strings from a response body.
///
/// A body that does not have the expected shape is searched for
/// `"prefix": "..."` fields instead.
pub fn extract_prefixes(body: &str) -> Vec<String> {
    if body.trim().is_empty() {
        return Vec::new();
    }

    let mut deserializer = serde_json::Deserializer::from_str(body);
    match serde_path_to_error::deserialize::<_, AnnouncedPrefixesResponse>(&mut deserializer) {
        Ok(parsed) => {
            log::debug!(
                "parsed {} prefixes, status={:?}",
                parsed.data.prefixes.len(),
                parsed.status
            );
            parsed.data.prefixes.into_iter().map(|p| p.prefix).collect()
        }
        Err(e) => {
            log::warn!(
                "Unexpected registry document: path={} error={}, searching for prefix fields",
                e.path(),
                e
            );
            harvest_prefixes(body)
        }
    }
}

/// Collect the value of every `"prefix": "..."` field in `body`.
pub fn harvest_prefixes(body: &str) -> Vec<String> {
    get_prefix_regex()
        .captures_iter(body)
        .map(|c| c[1].to_string())
        .collect()
}
