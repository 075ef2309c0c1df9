//! libcurl-backed [`Transport`].

use super::Transport;
use crate::config::FbdlConfig;
use crate::error::FetchError;
use curl::easy::Easy;
use std::time::Duration;

/// Per-request settings applied to every curl handle.
#[derive(Debug, Clone)]
pub struct TransportOptions {
    pub connect_timeout: Duration,
    /// Whole-request deadline.
    pub timeout: Duration,
    pub user_agent: String,
    /// Skip TLS certificate and host verification.
    pub insecure: bool,
}

impl Default for TransportOptions {
    fn default() -> Self {
        Self::from_config(&FbdlConfig::default())
    }
}

impl TransportOptions {
    pub fn from_config(cfg: &FbdlConfig) -> Self {
        Self {
            connect_timeout: Duration::from_secs(cfg.connect_timeout_secs),
            timeout: Duration::from_secs(cfg.timeout_secs),
            user_agent: cfg.user_agent(),
            insecure: cfg.insecure,
        }
    }
}

/// Blocking GET over libcurl. One fresh handle per request; follows redirects.
#[derive(Debug, Clone, Default)]
pub struct CurlTransport {
    opts: TransportOptions,
}

impl CurlTransport {
    pub fn new(opts: TransportOptions) -> Self {
        if opts.insecure {
            tracing::warn!("TLS certificate verification disabled");
        }
        Self { opts }
    }

    fn configure(&self, easy: &mut Easy, url: &str) -> Result<(), curl::Error> {
        easy.url(url)?;
        easy.get(true)?;
        easy.follow_location(true)?;
        easy.max_redirections(10)?;
        easy.connect_timeout(self.opts.connect_timeout)?;
        easy.timeout(self.opts.timeout)?;
        easy.useragent(&self.opts.user_agent)?;
        if self.opts.insecure {
            easy.ssl_verify_peer(false)?;
            easy.ssl_verify_host(false)?;
        }
        Ok(())
    }
}

impl Transport for CurlTransport {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let transport_err = |source: curl::Error| FetchError::Transport {
            url: url.to_string(),
            source,
        };

        let mut body = Vec::new();
        let mut easy = Easy::new();
        self.configure(&mut easy, url).map_err(transport_err)?;

        {
            let mut transfer = easy.transfer();
            transfer
                .write_function(|data| {
                    body.extend_from_slice(data);
                    Ok(data.len())
                })
                .map_err(transport_err)?;
            transfer.perform().map_err(transport_err)?;
        }

        let status = easy.response_code().map_err(transport_err)?;
        if !(200..300).contains(&status) {
            return Err(FetchError::Remote {
                url: url.to_string(),
                status,
            });
        }
        tracing::trace!(url, status, bytes = body.len(), "GET complete");
        Ok(body)
    }
}
