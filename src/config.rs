//! Configuration for ownet
//!
//! Plain settable fields with the owserver defaults.

use serde::{Deserialize, Serialize};

use crate::error::{OwError, Result};
use crate::protocol::Flags;

/// Default owserver host
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// IANA assigned owserver port (4304/tcp)
pub const DEFAULT_PORT: u16 = 4304;

/// Default socket read timeout (milliseconds)
pub const DEFAULT_READ_TIMEOUT_MS: u64 = 8000;

/// Default expected data length for reads
pub const DEFAULT_DATA_LEN: i32 = 4096;

/// Client configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Network Configuration
    // -------------------------------------------------------------------------
    /// owserver host name or IP address
    pub host: String,

    /// owserver TCP port
    pub port: u16,

    /// Socket read timeout (milliseconds), 0 disables it.
    /// Applies to reads only, never to connect.
    pub read_timeout_ms: u64,

    // -------------------------------------------------------------------------
    // Protocol Configuration
    // -------------------------------------------------------------------------
    /// Flags word sent with every request (formatting bits, passed opaquely)
    pub flags: Flags,

    /// Expected data length used by `read` when none is given
    pub default_data_len: i32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            read_timeout_ms: DEFAULT_READ_TIMEOUT_MS,
            flags: Flags::default(),
            default_data_len: DEFAULT_DATA_LEN,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Build a default config pointing at `host:port`
    pub fn from_addr(addr: &str) -> Result<Self> {
        let (host, port) = parse_addr(addr)?;
        Ok(Self::builder().host(host).port(port).build())
    }

    /// `host:port` string used for connecting and logging
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Split `host:port`, accepting a bare host (default port) and `[v6]:port`.
fn parse_addr(addr: &str) -> Result<(String, u16)> {
    let addr = addr.trim();
    if addr.is_empty() {
        return Err(OwError::Config("empty server address".to_string()));
    }

    let (host, port) = if let Some(rest) = addr.strip_prefix('[') {
        let end = rest
            .find(']')
            .ok_or_else(|| OwError::Config(format!("unterminated IPv6 address: {}", addr)))?;
        let host = &rest[..end];
        let port = rest[end + 1..].strip_prefix(':');
        (host, port)
    } else {
        match addr.rsplit_once(':') {
            Some((host, port)) if !host.contains(':') => (host, Some(port)),
            _ => (addr, None),
        }
    };

    let port = match port {
        Some(p) => p
            .parse::<u16>()
            .map_err(|_| OwError::Config(format!("invalid port in address: {}", addr)))?,
        None => DEFAULT_PORT,
    };

    Ok((host.to_string(), port))
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the owserver host
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.config.host = host.into();
        self
    }

    /// Set the owserver port
    pub fn port(mut self, port: u16) -> Self {
        self.config.port = port;
        self
    }

    /// Set the read timeout (in milliseconds)
    pub fn read_timeout_ms(mut self, ms: u64) -> Self {
        self.config.read_timeout_ms = ms;
        self
    }

    /// Set the flags word
    pub fn flags(mut self, flags: Flags) -> Self {
        self.config.flags = flags;
        self
    }

    /// Set the default expected data length for reads
    pub fn default_data_len(mut self, len: i32) -> Self {
        self.config.default_data_len = len;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
