//! Retrieval of the flipbook configuration resource.
//!
//! The network is reached only through the [`Transport`] trait so the parser
//! and resolver stay testable without sockets. The production transport is
//! libcurl (see [`CurlTransport`]).

mod curl_transport;

pub use curl_transport::{CurlTransport, TransportOptions};

use crate::error::FetchError;
use crate::reference::FlipbookReference;

/// Minimal GET interface the core needs from an HTTP client.
pub trait Transport {
    /// Fetches `url` and returns the body of a 2xx response.
    fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        (**self).fetch(url)
    }
}

/// Raw `config.js` text as served. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawConfig(String);

impl RawConfig {
    /// Wraps already-fetched text; `None` when the text is empty.
    pub fn new(text: impl Into<String>) -> Option<Self> {
        let text = text.into();
        if text.is_empty() {
            None
        } else {
            Some(Self(text))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Fetches the configuration resource for `reference` from `service_host`.
///
/// One attempt only: any failure is returned to the caller as-is.
pub fn fetch_config(
    transport: &dyn Transport,
    service_host: &str,
    reference: &FlipbookReference,
) -> Result<RawConfig, FetchError> {
    let url = reference.config_url(service_host);
    tracing::debug!(%url, "fetching flipbook config");
    let body = transport.fetch(&url)?;
    let text = String::from_utf8_lossy(&body).into_owned();
    let raw = RawConfig::new(text).ok_or(FetchError::EmptyBody { url: url.clone() })?;
    tracing::info!(%url, bytes = body.len(), "fetched flipbook config");
    Ok(raw)
}


#[cfg(test)]
mod tests {
    use super::testing::MemoryTransport;
    use super::*;

    const HOST: &str = "https://online.anyflip.com";
    const CONFIG_URL: &str = "https://online.anyflip.com/abcd/1234/mobile/javascript/config.js";

    fn reference() -> FlipbookReference {
        FlipbookReference::parse("https://online.anyflip.com/abcd/1234/mobile/index.html").unwrap()
    }

    #[test]
    fn fetches_from_mobile_javascript_path() {
        let t = MemoryTransport::new().with(CONFIG_URL, 200, "bookConfig.totalPageCount=3;");
        let raw = fetch_config(&t, HOST, &reference()).unwrap();
        assert_eq!(raw.as_str(), "bookConfig.totalPageCount=3;");
        assert_eq!(t.requests(), vec![CONFIG_URL.to_string()]);
    }

    #[test]
    fn non_success_status_is_remote_error() {
        let t = MemoryTransport::new().with(CONFIG_URL, 403, "denied");
        let err = fetch_config(&t, HOST, &reference()).unwrap_err();
        assert!(matches!(err, FetchError::Remote { status: 403, .. }));
        assert_eq!(t.requests().len(), 1, "no retry");
    }

    #[test]
    fn empty_body_is_rejected() {
        let t = MemoryTransport::new().with(CONFIG_URL, 200, "");
        let err = fetch_config(&t, HOST, &reference()).unwrap_err();
        assert!(matches!(err, FetchError::EmptyBody { .. }));
    }

    #[test]
    fn raw_config_rejects_empty_text() {
        assert!(RawConfig::new("").is_none());
        assert_eq!(RawConfig::new("x").unwrap().as_str(), "x");
    }
}
