//! HTTPS client for the RIPEstat announced-prefixes data call.

use super::extract::extract_prefixes;
use crate::config::{RegistryConfig, CONNECT_TIMEOUT_SECS, USER_AGENT};
use crate::error::RegistryError;
use crate::models::Asn;
use colored::Colorize;
use reqwest::{Client, StatusCode, Url};
use std::time::Duration;

/// Queries the routing registry for the prefixes an ASN announces.
///
/// The TLS policy is fixed when the client is built and shared by every
/// request made through it.
#[derive(Debug, Clone)]
pub struct RegistryClient {
    client: Client,
    base_url: String,
}

impl RegistryClient {
    /// Build a client honouring `config.tls`.
    ///
    /// A base URL the policy can never reach is refused here rather than on
    /// every request.
    pub fn new(config: RegistryConfig) -> Result<Self, RegistryError> {
        let tls = &config.tls;
        check_base_url(&config.base_url, tls.https_only)?;
        let mut builder = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.timeout)
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS).min(config.timeout))
            .https_only(tls.https_only)
            .min_tls_version(tls.min_version.into());
        if let Some(max_version) = tls.max_version {
            builder = builder.max_tls_version(max_version.into());
        }
        if !config.use_system_proxy {
            builder = builder.no_proxy();
        }
        let client = builder.build().map_err(RegistryError::Client)?;

        log::debug!(
            "registry client for {} min_tls={:?} max_tls={:?}",
            config.base_url,
            tls.min_version,
            tls.max_version
        );
        Ok(RegistryClient {
            client,
            base_url: config.base_url,
        })
    }

    /// Request URL for one ASN.
    pub fn resource_url(&self, asn: Asn) -> String {
        let separator = if self.base_url.contains('?') { '&' } else { '?' };
        format!("{}{separator}resource=AS{asn}", self.base_url)
    }

    /// Fetch the raw prefix strings announced by `asn`.
    ///
    /// A non-200 answer means the registry has nothing for us and yields an
    /// empty list. Failing to reach the registry at all is an error.
    pub async fn announced_prefixes(&self, asn: Asn) -> Result<Vec<String>, RegistryError> {
        let url = self.resource_url(asn);
        log::debug!("GET {}", url.on_blue());

        let response = self.client.get(&url).send().await.map_err(|e| {
            if e.is_connect() || e.is_timeout() {
                RegistryError::Connection {
                    url: url.clone(),
                    source: e,
                }
            } else {
                RegistryError::Http(e)
            }
        })?;

        let status = response.status();
        if status != StatusCode::OK {
            log::warn!(
                "{failed} AS{asn}: registry answered {status}, no prefixes",
                failed = "no data".on_red()
            );
            return Ok(Vec::new());
        }

        let body = response.text().await?;
        log::debug!("AS{asn}: body.len()={}", body.len());
        Ok(extract_prefixes(&body))
    }
}

fn check_base_url(base_url: &str, https_only: bool) -> Result<(), RegistryError> {
    let invalid = |reason: String| RegistryError::InvalidUrl {
        url: base_url.to_string(),
        reason,
    };
    let url = Url::parse(base_url).map_err(|e| invalid(e.to_string()))?;
    match url.scheme() {
        "https" => Ok(()),
        "http" if !https_only => Ok(()),
        "http" => Err(invalid("plain http with https only policy".to_string())),
        scheme => Err(invalid(format!("unsupported scheme {scheme}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{TlsPolicy, TlsVersion};
    use crate::tests::{plain_http_config, refused_url, serve_once};

    #[test]
    fn test_resource_url() {
        let client = RegistryClient::new(RegistryConfig::default()).unwrap();
        assert_eq!(
            client.resource_url(Asn(3333)),
            "https://stat.ripe.net/data/announced-prefixes/data.json?resource=AS3333"
        );

        let config = RegistryConfig {
            base_url: "https://example.net/data.json?sourceapp=test".to_string(),
            ..RegistryConfig::default()
        };
        let client = RegistryClient::new(config).unwrap();
        assert_eq!(
            client.resource_url(Asn(64496)),
            "https://example.net/data.json?sourceapp=test&resource=AS64496"
        );
    }

    #[test]
    fn test_build_with_tls_range() {
        let config = RegistryConfig {
            tls: TlsPolicy {
                min_version: TlsVersion::Tls12,
                max_version: Some(TlsVersion::Tls13),
                https_only: true,
            },
            ..RegistryConfig::default()
        };
        assert!(RegistryClient::new(config).is_ok());
    }

    #[tokio::test]
    async fn test_announced_prefixes_ok() {
        let body =
            std::fs::read_to_string("src/tests/test_data/ripe_announced_prefixes_as64496.json")
                .unwrap();
        let base_url = serve_once("200 OK", body).await;
        let client = RegistryClient::new(plain_http_config(base_url)).unwrap();

        let prefixes = client.announced_prefixes(Asn(64496)).await.unwrap();
        assert_eq!(prefixes.len(), 9);
    }

    #[tokio::test]
    async fn test_non_200_is_empty() {
        let base_url = serve_once("404 Not Found", String::new()).await;
        let client = RegistryClient::new(plain_http_config(base_url)).unwrap();

        let prefixes = client.announced_prefixes(Asn(64496)).await.unwrap();
        assert!(prefixes.is_empty());
    }

    #[tokio::test]
    async fn test_unreachable_registry_is_connection_error() {
        let client = RegistryClient::new(plain_http_config(refused_url().await)).unwrap();
        let err = client.announced_prefixes(Asn(64496)).await.unwrap_err();
        assert!(matches!(err, RegistryError::Connection { .. }), "{err:?}");
    }

    #[test]
    fn test_https_only_refuses_plain_http() {
        let config = RegistryConfig {
            base_url: "http://127.0.0.1:9/data.json".to_string(),
            ..RegistryConfig::default()
        };
        let err = RegistryClient::new(config).unwrap_err();
        assert!(matches!(err, RegistryError::InvalidUrl { .. }), "{err:?}");
        assert_eq!(
            err.to_string(),
            "invalid registry URL 'http://127.0.0.1:9/data.json': plain http with https only policy"
        );
    }

    #[test]
    fn test_rejects_unusable_base_url() {
        for base_url in ["stat.ripe.net/data.json", "ftp://stat.ripe.net/data.json", ""] {
            let config = RegistryConfig {
                base_url: base_url.to_string(),
                ..RegistryConfig::default()
            };
            let err = RegistryClient::new(config).unwrap_err();
            assert!(matches!(err, RegistryError::InvalidUrl { .. }), "{base_url}");
        }
        assert!(RegistryClient::new(plain_http_config("http://127.0.0.1:9/".to_string())).is_ok());
    }
}
