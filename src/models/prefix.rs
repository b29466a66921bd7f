//! IP prefix (CIDR block) type for IPv4 and IPv6.
//!
//! Provides [`IpPrefix`] for representing announced network prefixes,
//! along with the mask helpers used for containment tests. Both families are
//! handled as `u128` address values so the bit arithmetic is shared.

use crate::error::PrefixError;
use serde::{Serialize, Serializer};
use std::cmp::Ordering;
use std::error::Error;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::str::FromStr;

/// Maximum length for an IPv4 prefix (32 bits).
pub const MAX_LENGTH_V4: u8 = 32;
/// Maximum length for an IPv6 prefix (128 bits).
pub const MAX_LENGTH_V6: u8 = 128;

/// Address family of a prefix.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AddressFamily {
    Ipv4,
    Ipv6,
}

impl AddressFamily {
    /// Family of a plain address.
    pub fn of(addr: &IpAddr) -> AddressFamily {
        match addr {
            IpAddr::V4(_) => AddressFamily::Ipv4,
            IpAddr::V6(_) => AddressFamily::Ipv6,
        }
    }

    /// Longest valid prefix length for this family.
    pub fn max_len(self) -> u8 {
        match self {
            AddressFamily::Ipv4 => MAX_LENGTH_V4,
            AddressFamily::Ipv6 => MAX_LENGTH_V6,
        }
    }

    fn all_bits(self) -> u128 {
        match self {
            AddressFamily::Ipv4 => u32::MAX as u128,
            AddressFamily::Ipv6 => u128::MAX,
        }
    }
}

/// Result of asking whether one prefix sits inside another.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Containment {
    /// Same family, and equal to or nested inside the other prefix.
    Contained,
    /// Same family, but not inside the other prefix.
    NotContained,
    /// Different families; containment is undefined.
    Incomparable,
}

// Lengths above the family maximum saturate to the full mask.
fn raw_mask(family: AddressFamily, len: u8) -> u128 {
    let right_len = u32::from(family.max_len().saturating_sub(len));
    family
        .all_bits()
        .checked_shr(right_len)
        .unwrap_or(0)
        .checked_shl(right_len)
        .unwrap_or(0)
}

/// Convert a prefix length to a netmask for the given family.
///
/// # Examples
/// ```
/// use asn_cidr_summary::models::{prefix_mask, AddressFamily};
/// assert_eq!(prefix_mask(AddressFamily::Ipv4, 24).unwrap(), 0xFFFF_FF00);
/// ```
pub fn prefix_mask(family: AddressFamily, len: u8) -> Result<u128, Box<dyn Error>> {
    if len > family.max_len() {
        Err("Network length is too long".into())
    } else {
        Ok(raw_mask(family, len))
    }
}

/// Get the network address value for `bits` cut to `len`.
pub fn network_bits(bits: u128, family: AddressFamily, len: u8) -> Result<u128, Box<dyn Error>> {
    Ok(bits & prefix_mask(family, len)?)
}

/// Get the highest address value inside the network of `bits`/`len`.
pub fn broadcast_bits(bits: u128, family: AddressFamily, len: u8) -> Result<u128, Box<dyn Error>> {
    let mask = prefix_mask(family, len)?;
    Ok((bits & mask) | (!mask & family.all_bits()))
}

/// Address as an unsigned value, IPv4 in the low 32 bits.
pub fn addr_bits(addr: &IpAddr) -> u128 {
    match addr {
        IpAddr::V4(v4) => u32::from(*v4) as u128,
        IpAddr::V6(v6) => u128::from(*v6),
    }
}

fn bits_to_addr(family: AddressFamily, bits: u128) -> IpAddr {
    match family {
        AddressFamily::Ipv4 => IpAddr::V4(Ipv4Addr::from(bits as u32)),
        AddressFamily::Ipv6 => IpAddr::V6(Ipv6Addr::from(bits)),
    }
}

/// An announced network prefix, e.g. `198.51.100.0/24` or `2001:db8::/32`.
///
/// The address is always the network address: host bits are zero.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct IpPrefix {
    addr: IpAddr,
    len: u8,
}

impl IpPrefix {
    /// Create a new [`IpPrefix`] from a CIDR string (e.g., "10.0.0.0/24").
    ///
    /// Fails when the string is not `address/length`, the length is not a
    /// plain decimal within the family's range, or the address has host bits
    /// set. Surrounding whitespace is not accepted.
    pub fn new(addr_cidr: &str) -> Result<IpPrefix, PrefixError> {
        let (addr_part, len_part) = addr_cidr
            .split_once('/')
            .ok_or_else(|| PrefixError::parse(addr_cidr, "expected address/length"))?;
        let addr: IpAddr = addr_part
            .parse()
            .map_err(|_| PrefixError::parse(addr_cidr, format!("invalid address {addr_part}")))?;
        // u8::from_str takes '+8' and '008'.
        let plain_decimal = !len_part.is_empty()
            && len_part.bytes().all(|b| b.is_ascii_digit())
            && (len_part == "0" || !len_part.starts_with('0'));
        let len: u8 = len_part
            .parse()
            .ok()
            .filter(|_| plain_decimal)
            .ok_or_else(|| PrefixError::parse(addr_cidr, format!("invalid length {len_part}")))?;

        let family = AddressFamily::of(&addr);
        let mask = prefix_mask(family, len).map_err(|e| {
            PrefixError::parse(addr_cidr, format!("{e}: /{len} > /{}", family.max_len()))
        })?;
        if addr_bits(&addr) & !mask != 0 {
            return Err(PrefixError::parse(addr_cidr, "host bits set"));
        }

        Ok(IpPrefix { addr, len })
    }

    pub fn family(&self) -> AddressFamily {
        AddressFamily::of(&self.addr)
    }

    /// The network (lowest) address.
    pub fn network(&self) -> IpAddr {
        self.addr
    }

    /// Prefix length in bits.
    pub fn prefix_len(&self) -> u8 {
        self.len
    }

    /// Get the highest address in the prefix.
    pub fn broadcast(&self) -> IpAddr {
        let family = self.family();
        bits_to_addr(
            family,
            addr_bits(&self.addr) | (!raw_mask(family, self.len) & family.all_bits()),
        )
    }

    /// Check whether `self` lies inside `other`.
    ///
    /// Equal prefixes are [`Containment::Contained`]. Mixed families never
    /// compare; they report [`Containment::Incomparable`] instead of failing.
    pub fn containment_in(&self, other: &IpPrefix) -> Containment {
        let family = self.family();
        if family != other.family() {
            return Containment::Incomparable;
        }
        let cut = addr_bits(&self.addr) & raw_mask(family, other.len);
        if self.len >= other.len && cut == addr_bits(&other.addr) {
            Containment::Contained
        } else {
            Containment::NotContained
        }
    }

    /// Same family, nested inside `other`, and not equal to it.
    pub fn is_strict_subnet_of(&self, other: &IpPrefix) -> bool {
        self != other && self.containment_in(other) == Containment::Contained
    }

    /// Ordering key: family, then network value, then length (wider first).
    pub fn numeric_key(&self) -> (AddressFamily, u128, u8) {
        (self.family(), addr_bits(&self.addr), self.len)
    }
}

impl FromStr for IpPrefix {
    type Err = PrefixError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        IpPrefix::new(s)
    }
}

impl std::fmt::Display for IpPrefix {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}/{}", self.addr, self.len)
    }
}

impl Serialize for IpPrefix {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl Ord for IpPrefix {
    fn cmp(&self, other: &IpPrefix) -> Ordering {
        self.numeric_key().cmp(&other.numeric_key())
    }
}

impl PartialOrd for IpPrefix {
    fn partial_cmp(&self, other: &IpPrefix) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
