//! Collapse a sorted prefix list into its minimal covering set.
//!
//! One forward pass keeps the last accepted prefix as the current cover. A
//! prefix inside the cover is dropped; anything else, including a prefix of
//! the other address family, is accepted and becomes the new cover.

use super::normalize::{sort_canonical, sort_numeric};
use crate::error::PrefixError;
use crate::models::{Containment, IpPrefix};
use std::convert::Infallible;

/// How prefixes are ordered before the reduction pass.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum AggregationMode {
    /// Sort the CIDR strings as text. Compatible with the registry tooling
    /// this replaces, but a subnet whose text sorts before its parent
    /// survives next to it.
    #[default]
    Textual,
    /// Sort by address value and prefix length. Every nested prefix is
    /// removed.
    Numeric,
}

fn reduce<E, I>(sorted: I) -> Result<Vec<IpPrefix>, E>
where
    I: IntoIterator<Item = Result<IpPrefix, E>>,
{
    let mut unique: Vec<IpPrefix> = Vec::new();
    let mut cover: Option<IpPrefix> = None;

    for next in sorted {
        let next = next?;
        if let Some(current) = cover {
            match next.containment_in(&current) {
                Containment::Contained => {
                    log::trace!("{next} covered by {current}");
                    continue;
                }
                Containment::NotContained => {}
                Containment::Incomparable => {
                    log::debug!("address family changes at {next}, new cover")
                }
            }
        }
        unique.push(next);
        cover = Some(next);
    }

    Ok(unique)
}

/// Reduce canonically sorted CIDR strings.
///
/// Strings are parsed as they are reached; the first malformed one aborts
/// the pass with [`PrefixError::AddressParse`].
pub fn aggregate_sorted<S: AsRef<str>>(sorted: &[S]) -> Result<Vec<IpPrefix>, PrefixError> {
    reduce(sorted.iter().map(|s| IpPrefix::new(s.as_ref())))
}

/// Reduce already parsed prefixes, in the order given.
pub fn aggregate_prefixes(sorted: &[IpPrefix]) -> Vec<IpPrefix> {
    match reduce(sorted.iter().copied().map(Ok::<_, Infallible>)) {
        Ok(unique) => unique,
        Err(never) => match never {},
    }
}

/// Sort raw registry prefixes per `mode` and reduce them.
pub fn summarize(raw: Vec<String>, mode: AggregationMode) -> Result<Vec<IpPrefix>, PrefixError> {
    let count = raw.len();
    let unique = match mode {
        AggregationMode::Textual => aggregate_sorted(&sort_canonical(raw))?,
        AggregationMode::Numeric => aggregate_prefixes(&sort_numeric(&raw)?),
    };
    log::debug!(
        "summarize({mode:?}) {count} prefixes => {} unique",
        unique.len()
    );
    Ok(unique)
}
