//! Terminal output of resolved prefixes.

use crate::models::{Asn, IpPrefix};
use clap::ValueEnum;
use serde::Serialize;

/// How each ASN's prefixes are written to stdout.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// One CIDR per line, no ASN label.
    #[default]
    Text,
    /// One JSON object per ASN per line.
    Json,
}

#[derive(Serialize)]
struct AsnPrefixes<'a> {
    asn: u32,
    prefixes: &'a [IpPrefix],
}

/// Format prefixes one per line; empty input gives an empty string.
pub fn format_prefixes(prefixes: &[IpPrefix]) -> String {
    prefixes.iter().map(|p| format!("{p}\n")).collect()
}

/// Format one ASN as a single JSON line.
pub fn format_json(asn: Asn, prefixes: &[IpPrefix]) -> Result<String, serde_json::Error> {
    let line = serde_json::to_string(&AsnPrefixes {
        asn: asn.0,
        prefixes,
    })?;
    Ok(line + "\n")
}

/// Render one ASN's result in `format`.
pub fn render(
    format: OutputFormat,
    asn: Asn,
    prefixes: &[IpPrefix],
) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Text => Ok(format_prefixes(prefixes)),
        OutputFormat::Json => format_json(asn, prefixes),
    }
}
