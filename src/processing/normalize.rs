//! Canonical ordering of announced prefixes.
//!
//! The default order is the plain textual order of the CIDR strings. It puts
//! a parent in front of its subnets when they share a left-aligned textual
//! prefix, which is the common case for registry data. It is not a numeric
//! order: `10.0.0.0/16` sorts before `10.0.0.0/8`, and
//! `2001:db8:1::/48` before `2001:db8::/32`. [`sort_numeric`] is the exact
//! alternative.

use crate::error::PrefixError;
use crate::models::IpPrefix;

/// Sort raw CIDR strings by their text, ascending.
pub fn sort_canonical(mut raw: Vec<String>) -> Vec<String> {
    raw.sort();
    raw
}

/// Parse and sort by family, network address, then prefix length.
///
/// Fails on the first string that is not valid CIDR notation.
pub fn sort_numeric<S: AsRef<str>>(raw: &[S]) -> Result<Vec<IpPrefix>, PrefixError> {
    let mut prefixes = raw
        .iter()
        .map(|s| IpPrefix::new(s.as_ref()))
        .collect::<Result<Vec<_>, _>>()?;
    prefixes.sort();
    Ok(prefixes)
}
