//! Autonomous System Number parsing.

use crate::error::AsnError;
use itertools::Itertools;
use std::fmt;

/// An Autonomous System Number, e.g. `AS64496`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Asn(pub u32);

impl Asn {
    /// Parse `64496`, `AS64496` or `as64496`.
    pub fn parse(input: &str) -> Result<Asn, AsnError> {
        let trimmed = input.trim();
        let digits = match trimmed.get(..2) {
            Some(head) if head.eq_ignore_ascii_case("as") => &trimmed[2..],
            _ => trimmed,
        };
        // u32::from_str takes a leading '+', which is not an ASN.
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(AsnError::Invalid(input.to_string()));
        }
        digits
            .parse()
            .map(Asn)
            .map_err(|_| AsnError::Invalid(input.to_string()))
    }
}

impl fmt::Display for Asn {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Parse every whitespace separated token, dropping repeated ASNs.
///
/// Returns the unique ASNs in first-seen order and the tokens that failed.
pub fn parse_asn_list<'a, I>(tokens: I) -> (Vec<Asn>, Vec<AsnError>)
where
    I: IntoIterator<Item = &'a str>,
{
    let (asns, errors): (Vec<_>, Vec<_>) = tokens
        .into_iter()
        .flat_map(str::split_whitespace)
        .map(Asn::parse)
        .partition_result();
    (asns.into_iter().unique().collect(), errors)
}
