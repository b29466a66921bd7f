//! Command line arguments and ASN input gathering.

use crate::config::{
    RegistryConfig, TlsPolicy, TlsVersion, DEFAULT_RIPE_URL, DEFAULT_TIMEOUT_SECS,
};
use crate::output::OutputFormat;
use crate::processing::AggregationMode;
use clap::Parser;
use std::io::{self, BufRead, IsTerminal};
use std::time::Duration;

/// List the minimal set of CIDR blocks announced by one or more ASNs.
#[derive(Parser, Debug)]
#[command(name = "asn-cidr-summary", version)]
#[command(about = "List the minimal set of CIDR blocks announced by one or more ASNs")]
pub struct Args {
    /// ASN numbers, with or without a leading AS. Given `-`, or no ASN at
    /// all with stdin piped, ASNs are also read from stdin
    pub asn: Vec<String>,

    /// Order prefixes by address value so every nested prefix is removed,
    /// instead of the default textual order
    #[arg(long, env = "ASN_CIDR_STRICT")]
    pub strict: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Announced-prefixes endpoint
    #[arg(long, env = "ASN_CIDR_RIPE_URL", default_value = DEFAULT_RIPE_URL)]
    pub url: String,

    /// Lowest TLS version the client negotiates
    #[arg(long, value_enum, env = "ASN_CIDR_MIN_TLS", default_value_t = TlsVersion::Tls12)]
    pub min_tls: TlsVersion,

    /// Request timeout in seconds
    #[arg(long, env = "ASN_CIDR_TIMEOUT", default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,

    /// Ignore proxy settings from the environment
    #[arg(long)]
    pub no_proxy: bool,
}

impl Args {
    pub fn mode(&self) -> AggregationMode {
        if self.strict {
            AggregationMode::Numeric
        } else {
            AggregationMode::Textual
        }
    }

    pub fn registry_config(&self) -> RegistryConfig {
        RegistryConfig {
            base_url: self.url.clone(),
            timeout: Duration::from_secs(self.timeout),
            tls: TlsPolicy {
                min_version: self.min_tls,
                ..TlsPolicy::default()
            },
            use_system_proxy: !self.no_proxy,
        }
    }
}

/// Positional token asking for ASNs from stdin as well.
pub const STDIN_MARKER: &str = "-";

/// Stdin is read when `-` is given, or when no ASN is given and stdin is
/// not a terminal.
pub fn reads_stdin(positional: &[String], stdin_is_terminal: bool) -> bool {
    positional.iter().any(|a| a == STDIN_MARKER) || (positional.is_empty() && !stdin_is_terminal)
}

/// Positional ASNs, plus stdin lines when [`reads_stdin`] says so.
///
/// Blocks until stdin is closed if it is read.
pub fn read_asn_tokens(positional: &[String]) -> io::Result<Vec<String>> {
    let stdin = io::stdin();
    if reads_stdin(positional, stdin.is_terminal()) {
        collect_asn_tokens(positional, Some(stdin.lock()))
    } else {
        collect_asn_tokens(positional, None::<io::StdinLock<'_>>)
    }
}

/// Join positional arguments, minus `-`, with every line of `input`.
pub fn collect_asn_tokens<R: BufRead>(
    positional: &[String],
    input: Option<R>,
) -> io::Result<Vec<String>> {
    let mut tokens: Vec<String> = positional
        .iter()
        .filter(|a| *a != STDIN_MARKER)
        .cloned()
        .collect();
    if let Some(input) = input {
        for line in input.lines() {
            tokens.push(line?);
        }
    }
    log::debug!("collected {} ASN input lines", tokens.len());
    Ok(tokens)
}
