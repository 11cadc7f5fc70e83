//! Network reachability.
//!
//! The refresh worker asks a [`Connectivity`] before every cycle and tells
//! the UI whenever the answer changes.

use std::net::{TcpStream, ToSocketAddrs};
use std::time::Duration;

use reqwest::Url;

const PROBE_TIMEOUT: Duration = Duration::from_secs(3);

pub trait Connectivity: Send {
    fn is_connected(&self) -> bool;
}

/// Considers the network up when a TCP connection to the API host succeeds.
pub struct TcpProbe {
    host: String,
    port: u16,
}

impl TcpProbe {
    /// Probe the host and port of `url`.  Returns `None` for URLs without
    /// a host.
    pub fn for_url(url: &str) -> Option<Self> {
        let parsed = Url::parse(url).ok()?;
        Some(Self {
            host: parsed.host_str()?.to_string(),
            port: parsed.port_or_known_default()?,
        })
    }
}

impl Connectivity for TcpProbe {
    fn is_connected(&self) -> bool {
        let addrs = match (self.host.as_str(), self.port).to_socket_addrs() {
            Ok(addrs) => addrs,
            Err(e) => {
                tracing::debug!(host = %self.host, error = %e, "name resolution failed");
                return false;
            }
        };
        addrs
            .into_iter()
            .any(|addr| TcpStream::connect_timeout(&addr, PROBE_TIMEOUT).is_ok())
    }
}

/// Skips probing; for networks where the probe gives false negatives.
pub struct AlwaysOnline;

impl Connectivity for AlwaysOnline {
    fn is_connected(&self) -> bool {
        true
    }
}
