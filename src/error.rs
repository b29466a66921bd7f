//! Error types for ASN prefix resolution.
//!
//! Each concern has its own error so callers can decide per failure kind:
//! a bad prefix only costs one ASN, a dead registry ends the run.

use thiserror::Error;

/// Failure to turn a CIDR string into an [`IpPrefix`](crate::models::IpPrefix).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PrefixError {
    #[error("invalid CIDR '{input}': {reason}")]
    AddressParse { input: String, reason: String },
}

impl PrefixError {
    pub(crate) fn parse(input: &str, reason: impl Into<String>) -> Self {
        PrefixError::AddressParse {
            input: input.to_string(),
            reason: reason.into(),
        }
    }
}

/// Failure to read an ASN identifier.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AsnError {
    #[error("invalid ASN identifier '{0}'")]
    Invalid(String),
}

/// Failures talking to the routing registry.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("cannot connect to registry {url}: {source}")]
    Connection {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("invalid registry URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
}

/// Top level error for one run of the tool.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Prefix(#[from] PrefixError),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error("no ASN given on the command line or stdin")]
    NoAsn,

    #[error("interrupted")]
    Interrupted,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
