//! Domain models for ASN prefix resolution.
//!
//! This module contains the core data structures used throughout the application:
//! - [`IpPrefix`] - IPv4/IPv6 network prefix with CIDR notation support
//! - [`Asn`] - Autonomous System Number as given by the user

mod asn;
mod prefix;

// Re-export public types
pub use asn::{parse_asn_list, Asn};
pub use prefix::{
    addr_bits, broadcast_bits, network_bits, prefix_mask, AddressFamily, Containment, IpPrefix,
    MAX_LENGTH_V4, MAX_LENGTH_V6,
};
