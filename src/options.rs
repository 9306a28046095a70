//! Server options.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

/// Where to listen and whether to log each request.
///
/// ```rust
/// use stremio_addon::Options;
///
/// let options = Options::default().port(7000).log_requests(false);
/// assert_eq!(options.socket_addr().port(), 7000);
/// ```
#[derive(Clone, Debug)]
pub struct Options {
    /// Interface to bind. Defaults to loopback; set `0.0.0.0` behind a proxy.
    pub bind_addr: IpAddr,
    pub port: u16,
    /// Emit one access-log record per request.
    pub log_requests: bool,
}

impl Options {
    pub fn bind_addr(mut self, addr: IpAddr) -> Self {
        self.bind_addr = addr;
        self
    }

    pub fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn log_requests(mut self, enabled: bool) -> Self {
        self.log_requests = enabled;
        self
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_addr, self.port)
    }
}

impl Default for Options {
    fn default() -> Self {
        Self {
            bind_addr: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 8080,
            log_requests: true,
        }
    }
}
