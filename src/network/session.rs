//! Transport Session
//!
//! Owns the stream to one owserver and applies the connection policy.
//!
//! ```text
//!            ensure_connected()
//!   Closed ─────────────────────► Open ──┐ close(false), Persistent
//!     ▲                            │  ◄──┘
//!     └────────────────────────────┘
//!       close(true), or close(false) while Transient
//! ```
//!
//! The server decides whether a connection survives an operation: every
//! response header carries the persistence bit, and the session records it.

use std::time::Duration;

use crate::config::Config;
use crate::error::{OwError, Result};
use crate::network::connector::{Connector, TcpConnector};
use crate::protocol::{read_header, read_payload, write_message, ResponseHeader};

/// Connection reuse policy, as last reported by the server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionMode {
    /// Closed after every operation
    #[default]
    Transient,

    /// Kept open across operations until forced closed
    Persistent,
}

/// A single logical connection to owserver
pub struct Session<C: Connector = TcpConnector> {
    /// Opens new streams
    connector: C,

    /// Remote host
    host: String,

    /// Remote port
    port: u16,

    /// Applied on every fresh connect
    read_timeout: Option<Duration>,

    /// Open stream, `None` while closed
    stream: Option<C::Stream>,

    /// Set only from server responses
    mode: ConnectionMode,
}

impl Session<TcpConnector> {
    /// Create a closed TCP session for the configured server
    pub fn new(config: &Config) -> Self {
        Self::with_connector(config, TcpConnector)
    }
}

impl<C: Connector> Session<C> {
    /// Create a closed session that opens streams through `connector`
    pub fn with_connector(config: &Config, connector: C) -> Self {
        Self {
            connector,
            host: config.host.clone(),
            port: config.port,
            read_timeout: timeout_from_ms(config.read_timeout_ms),
            stream: None,
            mode: ConnectionMode::Transient,
        }
    }

    /// Connection mode observed from the last response
    pub fn mode(&self) -> ConnectionMode {
        self.mode
    }

    /// True while a stream is held
    pub fn is_open(&self) -> bool {
        self.stream.is_some()
    }

    /// `host:port` of the remote server
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Change the read timeout, applying it to an open stream right away
    pub fn set_read_timeout(&mut self, ms: u64) -> Result<()> {
        self.read_timeout = timeout_from_ms(ms);
        if let Some(stream) = self.stream.as_ref() {
            self.connector.set_read_timeout(stream, self.read_timeout)?;
        }
        Ok(())
    }

    /// Make sure a stream is open, following the connection policy
    ///
    /// - Transient: always a fresh connect, dropping any stale stream first
    /// - Persistent with an open stream: reused as-is
    /// - Persistent without one: reconnect to the same address
    pub fn ensure_connected(&mut self) -> Result<()> {
        match (self.mode, self.stream.is_some()) {
            (ConnectionMode::Persistent, true) => {
                tracing::trace!("Reusing persistent connection to {}", self.addr());
                return Ok(());
            }
            (ConnectionMode::Persistent, false) => {
                tracing::debug!("Reconnecting to {}", self.addr());
            }
            (ConnectionMode::Transient, _) => {
                if self.stream.is_some() {
                    self.close(true);
                }
                tracing::debug!("Connecting to {}", self.addr());
            }
        }

        let stream = self
            .connector
            .connect(&self.host, self.port, self.read_timeout)?;
        self.stream = Some(stream);
        Ok(())
    }

    /// Release the stream
    ///
    /// A persistent connection survives unless `force` is set. Any close
    /// drops back to transient mode until the server grants persistence again.
    pub fn close(&mut self, force: bool) {
        if self.mode == ConnectionMode::Persistent && !force {
            return;
        }

        self.mode = ConnectionMode::Transient;
        if self.stream.take().is_some() {
            tracing::debug!("Disconnected from {}", self.addr());
        }
    }

    /// Send an encoded message
    ///
    /// On a persistent connection a failed write is retried exactly once on
    /// a fresh connection; the server may have dropped an idle socket.
    pub fn send(&mut self, message: &[u8]) -> Result<()> {
        let first = match self.stream.as_mut() {
            Some(stream) => write_message(stream, message),
            None => return Err(not_connected()),
        };

        let err = match first {
            Ok(()) => return Ok(()),
            Err(e) => e,
        };

        if self.mode != ConnectionMode::Persistent {
            return Err(err.into());
        }

        tracing::warn!(
            "Write to {} failed ({}), reconnecting once",
            self.addr(),
            err
        );
        self.close(true);
        self.ensure_connected()?;

        let stream = self.stream.as_mut().ok_or_else(not_connected)?;
        write_message(stream, message)?;
        Ok(())
    }

    /// Receive the next response header and record the server's persistence choice
    ///
    /// A short or unreadable header force-closes the session, even if
    /// persistent, so the next operation starts on a clean stream.
    pub fn receive_header(&mut self) -> Result<ResponseHeader> {
        let stream = self.stream.as_mut().ok_or_else(not_connected)?;

        let header = match read_header(stream) {
            Ok(header) => header,
            Err(e) => {
                self.close(true);
                return Err(e);
            }
        };

        self.mode = if header.is_persistent() {
            ConnectionMode::Persistent
        } else {
            ConnectionMode::Transient
        };

        tracing::trace!(
            version = header.version,
            payload_len = header.payload_len,
            ret_value = header.ret_value,
            flags = %header.flags,
            data_len = header.data_len,
            offset = header.offset,
            mode = ?self.mode,
            "Received header"
        );

        Ok(header)
    }

    /// Receive the payload announced by `header`
    pub fn receive_payload(&mut self, header: &ResponseHeader) -> Result<Vec<u8>> {
        let stream = self.stream.as_mut().ok_or_else(not_connected)?;

        match read_payload(stream, header) {
            Ok(payload) => Ok(payload),
            Err(e) => {
                self.close(true);
                Err(e)
            }
        }
    }
}

fn timeout_from_ms(ms: u64) -> Option<Duration> {
    (ms > 0).then(|| Duration::from_millis(ms))
}

fn not_connected() -> OwError {
    OwError::Io(std::io::Error::new(
        std::io::ErrorKind::NotConnected,
        "session is not connected",
    ))
}
