//! Configuration constants and values for the registry client.

use clap::ValueEnum;
use std::time::Duration;

/// RIPEstat announced-prefixes data call.
pub const DEFAULT_RIPE_URL: &str = "https://stat.ripe.net/data/announced-prefixes/data.json";
/// Whole request timeout, seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const CONNECT_TIMEOUT_SECS: u64 = 10;
pub const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// TLS protocol versions the client may be restricted to.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
pub enum TlsVersion {
    #[value(name = "1.2")]
    Tls12,
    #[value(name = "1.3")]
    Tls13,
}

impl From<TlsVersion> for reqwest::tls::Version {
    fn from(version: TlsVersion) -> Self {
        match version {
            TlsVersion::Tls12 => reqwest::tls::Version::TLS_1_2,
            TlsVersion::Tls13 => reqwest::tls::Version::TLS_1_3,
        }
    }
}

/// Which TLS versions and schemes the registry client accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TlsPolicy {
    pub min_version: TlsVersion,
    pub max_version: Option<TlsVersion>,
    /// Refuse plain `http://` URLs.
    pub https_only: bool,
}

impl Default for TlsPolicy {
    // TLS 1.0 and 1.1 are never negotiated.
    fn default() -> Self {
        TlsPolicy {
            min_version: TlsVersion::Tls12,
            max_version: None,
            https_only: true,
        }
    }
}

/// Everything needed to build a [`RegistryClient`](crate::ripe::RegistryClient).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub tls: TlsPolicy,
    /// Honour `HTTPS_PROXY` and friends.
    pub use_system_proxy: bool,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        RegistryConfig {
            base_url: DEFAULT_RIPE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            tls: TlsPolicy::default(),
            use_system_proxy: true,
        }
    }
}
