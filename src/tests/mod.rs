//! Shared test helpers and tests for the per-ASN run loop.

use super::*;
use crate::config::{RegistryConfig, TlsPolicy};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

const FIXTURE_AS64496: &str = "src/tests/test_data/ripe_announced_prefixes_as64496.json";

/// Serve one canned HTTP response per connection, in order.
///
/// Returns the registry base URL to point a client at.
pub(crate) async fn serve_sequence(responses: Vec<(&'static str, String)>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        for (status_line, body) in responses {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            let response = format!(
                "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
        }
    });
    format!("http://{addr}/data/announced-prefixes/data.json")
}

pub(crate) async fn serve_once(status_line: &'static str, body: String) -> String {
    serve_sequence(vec![(status_line, body)]).await
}

/// A URL on a local port nothing listens on.
pub(crate) async fn refused_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}/data.json")
}

/// Plain http against a local server, without any system proxy.
pub(crate) fn plain_http_config(base_url: String) -> RegistryConfig {
    RegistryConfig {
        base_url,
        timeout: Duration::from_secs(5),
        tls: TlsPolicy {
            https_only: false,
            ..TlsPolicy::default()
        },
        use_system_proxy: false,
    }
}

fn fixture() -> String {
    std::fs::read_to_string(FIXTURE_AS64496).unwrap()
}

async fn resolve_text(
    responses: Vec<(&'static str, String)>,
    asns: &[Asn],
) -> (Result<(), Error>, String) {
    let base_url = serve_sequence(responses).await;
    let client = RegistryClient::new(plain_http_config(base_url)).unwrap();
    let mut out = Vec::new();
    let result = resolve_all(
        &client,
        asns,
        AggregationMode::Textual,
        OutputFormat::Text,
        &mut out,
    )
    .await;
    (result, String::from_utf8(out).unwrap())
}

const FIXTURE_TEXT: &str =
    "192.0.2.0/24\n198.51.100.0/24\n2001:db8:1::/48\n2001:db8::/32\n203.0.113.0/24\n";

#[test]
fn test_get_asns() {
    let tokens: Vec<String> = ["AS64496", "bogus", "64496", "as64497"]
        .iter()
        .map(|t| t.to_string())
        .collect();
    assert_eq!(get_asns(&tokens).unwrap(), vec![Asn(64496), Asn(64497)]);
}

#[test]
fn test_get_asns_none_valid() {
    let tokens = vec!["bogus".to_string(), "AS".to_string()];
    assert!(matches!(get_asns(&tokens), Err(Error::NoAsn)));
    assert!(matches!(get_asns(&[]), Err(Error::NoAsn)));
}

#[tokio::test]
async fn test_bad_prefix_skips_only_that_asn() {
    let bad = r#"{"data":{"prefixes":[{"prefix":"10.0.0.0/33"}]}}"#.to_string();
    let (result, text) = resolve_text(
        vec![("200 OK", bad), ("200 OK", fixture())],
        &[Asn(64500), Asn(64496)],
    )
    .await;

    assert!(result.is_ok(), "{result:?}");
    assert_eq!(text, FIXTURE_TEXT);
}

#[tokio::test]
async fn test_missing_data_prints_nothing_and_continues() {
    let (result, text) = resolve_text(
        vec![("404 Not Found", String::new()), ("200 OK", fixture())],
        &[Asn(64500), Asn(64496)],
    )
    .await;

    assert!(result.is_ok(), "{result:?}");
    assert_eq!(text, FIXTURE_TEXT);
}

#[tokio::test]
async fn test_unreachable_registry_ends_run() {
    let client = RegistryClient::new(plain_http_config(refused_url().await)).unwrap();
    let mut out = Vec::new();
    let result = resolve_all(
        &client,
        &[Asn(64496), Asn(64497)],
        AggregationMode::Textual,
        OutputFormat::Text,
        &mut out,
    )
    .await;

    assert!(
        matches!(result, Err(Error::Registry(RegistryError::Connection { .. }))),
        "{result:?}"
    );
    assert!(out.is_empty());
}

/// Output whose reader went away.
struct ClosedPipe;

impl Write for ClosedPipe {
    fn write(&mut self, _: &[u8]) -> io::Result<usize> {
        Err(io::ErrorKind::BrokenPipe.into())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Output that fails for any other reason.
struct FullDisk;

impl Write for FullDisk {
    fn write(&mut self, _: &[u8]) -> io::Result<usize> {
        Err(io::Error::other("no space left"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[tokio::test]
async fn test_closed_output_stops_cleanly() {
    // second response never requested
    let base_url = serve_sequence(vec![("200 OK", fixture()), ("200 OK", fixture())]).await;
    let client = RegistryClient::new(plain_http_config(base_url)).unwrap();
    let result = resolve_all(
        &client,
        &[Asn(64496), Asn(64497)],
        AggregationMode::Textual,
        OutputFormat::Text,
        &mut ClosedPipe,
    )
    .await;

    assert!(result.is_ok(), "{result:?}");
}

#[tokio::test]
async fn test_other_output_errors_end_run() {
    let base_url = serve_once("200 OK", fixture()).await;
    let client = RegistryClient::new(plain_http_config(base_url)).unwrap();
    let result = resolve_all(
        &client,
        &[Asn(64496)],
        AggregationMode::Textual,
        OutputFormat::Text,
        &mut FullDisk,
    )
    .await;

    assert!(matches!(result, Err(Error::Io(_))), "{result:?}");
}
