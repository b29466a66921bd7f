//! Resolve the minimal set of CIDR blocks announced by one or more ASNs.
//!
//! Prefixes come from the RIPEstat announced-prefixes data call and are
//! collapsed so that no printed prefix sits inside another printed prefix.

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod output;
pub mod processing;
pub mod ripe;

use cli::Args;
use colored::Colorize;
pub use error::{Error, PrefixError, RegistryError};
use models::{parse_asn_list, Asn, IpPrefix};
use output::OutputFormat;
use processing::{summarize, AggregationMode};
use ripe::RegistryClient;
use std::io::{self, Write};

/// Parse ASN input lines; invalid identifiers are logged and skipped.
pub fn get_asns(tokens: &[String]) -> Result<Vec<Asn>, Error> {
    let (asns, errors) = parse_asn_list(tokens.iter().map(String::as_str));
    for e in errors {
        log::warn!("{e}, skipped");
    }
    if asns.is_empty() {
        return Err(Error::NoAsn);
    }
    Ok(asns)
}

/// Fetch and aggregate the prefixes announced by one ASN.
pub async fn resolve_asn(
    client: &RegistryClient,
    asn: Asn,
    mode: AggregationMode,
) -> Result<Vec<IpPrefix>, Error> {
    let raw = client.announced_prefixes(asn).await?;
    log::info!("AS{asn}: {} announced prefixes", raw.len());
    Ok(summarize(raw, mode)?)
}

/// Resolve `asns` in order and write each result to `out`.
///
/// A bad prefix from the registry, or a request that fails after reaching
/// it, costs only that ASN's output. An unreachable registry or an unusable
/// request ends the run. The first Ctrl-C drops the ASN being resolved; a
/// second one ends the run. A closed `out` stops quietly.
pub async fn resolve_all<W: Write>(
    client: &RegistryClient,
    asns: &[Asn],
    mode: AggregationMode,
    format: OutputFormat,
    out: &mut W,
) -> Result<(), Error> {
    let mut interrupted = false;
    for &asn in asns {
        let result = tokio::select! {
            result = resolve_asn(client, asn, mode) => result,
            _ = tokio::signal::ctrl_c() => {
                if interrupted {
                    return Err(Error::Interrupted);
                }
                interrupted = true;
                log::warn!("AS{asn} {}, no output", "interrupted".on_red());
                continue;
            }
        };

        let prefixes = match result {
            Ok(prefixes) => prefixes,
            Err(Error::Prefix(e)) => {
                log::error!("AS{asn} {}: {e}", "skipped".on_red());
                continue;
            }
            Err(Error::Registry(RegistryError::Http(e))) if !e.is_builder() => {
                log::error!("AS{asn} {}: {e}", "skipped".on_red());
                continue;
            }
            Err(e) => return Err(e),
        };

        let text = output::render(format, asn, &prefixes).map_err(io::Error::from)?;
        if let Err(e) = out.write_all(text.as_bytes()).and_then(|()| out.flush()) {
            if e.kind() == io::ErrorKind::BrokenPipe {
                log::debug!("output closed, stopping after AS{asn}");
                return Ok(());
            }
            return Err(e.into());
        }
    }

    Ok(())
}

/// Gather the requested ASNs, then resolve and print them to stdout.
pub async fn run(args: Args) -> Result<(), Error> {
    let positional = args.asn.clone();
    let tokens = tokio::task::spawn_blocking(move || cli::read_asn_tokens(&positional))
        .await
        .map_err(io::Error::other)??;
    let asns = get_asns(&tokens)?;
    let client = RegistryClient::new(args.registry_config())?;
    let mode = args.mode();
    log::info!("resolving {} ASN(s), mode={mode:?}", asns.len());

    resolve_all(&client, &asns, mode, args.format, &mut io::stdout()).await
}

#[cfg(test)]
mod tests;
