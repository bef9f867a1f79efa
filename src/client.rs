//! Request Engine
//!
//! Drives each owserver operation as a fixed exchange over a [`Session`].
//!
//! ## Exchange
//! 1. Make sure the session holds a connection
//! 2. Send header + payload in one write
//! 3. Receive one or more response headers (and payloads)
//! 4. Map the return code to a value or an error
//! 5. Release the connection: kept if the server granted persistence and
//!    the operation succeeded, closed otherwise
//!
//! ## Directory listings
//! - `dir`: one response packet per entry. A zero `payload_len` ends the
//!   list; a negative one is the server asking the client to keep waiting.
//! - `dir_all`: a single packet holding every entry joined by commas.

use crate::config::Config;
use crate::error::{OwError, Result};
use crate::network::{ConnectionMode, Connector, Session, TcpConnector};
use crate::protocol::{decode_payload, encode_request, Flags, Request, ResponseHeader};

/// Client for one owserver
///
/// Each client owns a single session. Use independent clients (or a
/// [`SharedClient`](crate::SharedClient)) for concurrent queries.
pub struct OwClient<C: Connector = TcpConnector> {
    /// Client configuration
    config: Config,

    /// Connection to the server
    session: Session<C>,
}

impl OwClient<TcpConnector> {
    /// Create a client for the configured server
    ///
    /// No connection is made until the first operation (or `connect`).
    pub fn new(config: Config) -> Self {
        let session = Session::new(&config);
        Self { config, session }
    }
}

impl<C: Connector> OwClient<C> {
    /// Create a client that opens its streams through `connector`
    pub fn with_connector(config: Config, connector: C) -> Self {
        let session = Session::with_connector(&config, connector);
        Self { config, session }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Connection mode the server granted on the last response
    pub fn mode(&self) -> ConnectionMode {
        self.session.mode()
    }

    /// True while a connection is held open
    pub fn is_connected(&self) -> bool {
        self.session.is_open()
    }

    /// Set the flags word used on subsequent requests
    pub fn set_flags(&mut self, flags: Flags) {
        self.config.flags = flags;
    }

    /// Set the expected data length used by `read`
    pub fn set_default_data_len(&mut self, len: i32) {
        self.config.default_data_len = len;
    }

    /// Set the socket read timeout, applied immediately to an open connection
    pub fn set_read_timeout(&mut self, ms: u64) -> Result<()> {
        self.config.read_timeout_ms = ms;
        self.session.set_read_timeout(ms)
    }

    // =========================================================================
    // Connection Control
    // =========================================================================

    /// Open the connection ahead of the first operation
    pub fn connect(&mut self) -> Result<()> {
        self.session.ensure_connected()
    }

    /// Close the connection, even a persistent one
    pub fn disconnect(&mut self) {
        self.session.close(true);
    }

    // =========================================================================
    // Operations
    // =========================================================================

    /// Read an attribute using the configured default data length
    pub fn read(&mut self, path: &str) -> Result<String> {
        let expected_len = self.config.default_data_len;
        self.read_with_len(path, expected_len)
    }

    /// Read an attribute, telling the server how many bytes to expect
    ///
    /// The value is returned exactly as sent (`payload[offset..offset + data_len]`).
    pub fn read_with_len(&mut self, path: &str, expected_len: i32) -> Result<String> {
        let request = Request::Read {
            path: path.to_string(),
            data_len: expected_len,
        };

        self.exchange(&request, |session| {
            let header = session.receive_header()?;
            check_return(&header)?;
            receive_value(session, &header)
        })
    }

    /// Write a value to an attribute
    pub fn write(&mut self, path: &str, value: &str) -> Result<()> {
        let request = Request::Write {
            path: path.to_string(),
            value: value.to_string(),
        };

        self.exchange(&request, |session| {
            let header = session.receive_header()?;
            check_return(&header)?;
            session.receive_payload(&header)?;
            Ok(())
        })
    }

    /// Check that a path exists on the bus
    ///
    /// Returns `Ok(true)` when present; a missing path is `OwError::NotFound`.
    pub fn presence(&mut self, path: &str) -> Result<bool> {
        let request = Request::Presence {
            path: path.to_string(),
        };

        self.exchange(&request, |session| {
            let header = session.receive_header()?;
            if header.is_error() {
                return Err(OwError::NotFound {
                    path: path.to_string(),
                    code: header.ret_value,
                });
            }
            session.receive_payload(&header)?;
            Ok(true)
        })
    }

    /// List a directory, one response packet per entry
    pub fn dir(&mut self, path: &str) -> Result<Vec<String>> {
        let request = Request::Dir {
            path: path.to_string(),
        };

        self.exchange(&request, |session| {
            let mut entries = Vec::new();
            loop {
                let header = session.receive_header()?;
                check_return(&header)?;

                match header.payload_len {
                    0 => break,
                    len if len > 0 => {
                        let payload = session.receive_payload(&header)?;
                        entries.push(decode_payload(&header, &payload)?);
                    }
                    // Server is still working; no entry, no end of list
                    _ => tracing::trace!("Directory listing pending, waiting"),
                }
            }
            Ok(entries)
        })
    }

    /// List a directory as a single comma-joined packet
    pub fn dir_all(&mut self, path: &str) -> Result<Vec<String>> {
        let request = Request::DirAll {
            path: path.to_string(),
        };

        self.exchange(&request, |session| {
            let header = session.receive_header()?;
            check_return(&header)?;

            if header.payload_len <= 0 {
                return Ok(Vec::new());
            }
            let payload = session.receive_payload(&header)?;
            Ok(split_entries(&decode_payload(&header, &payload)?))
        })
    }

    /// Read a file or list a directory, whichever `path` names
    ///
    /// Directories come back comma-joined, as from `dir_all`.
    pub fn get(&mut self, path: &str) -> Result<String> {
        let request = Request::Get {
            path: path.to_string(),
            data_len: self.config.default_data_len,
        };

        self.exchange(&request, |session| {
            let header = session.receive_header()?;
            check_return(&header)?;
            receive_value(session, &header)
        })
    }

    /// Round-trip a no-op message to check the server is alive
    pub fn ping(&mut self) -> Result<()> {
        self.exchange(&Request::Nop, |session| {
            let header = session.receive_header()?;
            check_return(&header)?;
            session.receive_payload(&header)?;
            Ok(())
        })
    }

    // =========================================================================
    // Exchange Plumbing
    // =========================================================================

    /// Run one request/response exchange and release the connection
    ///
    /// Success keeps a persistent connection open; any error force-closes it
    /// so a half-read stream is never reused.
    fn exchange<T, F>(&mut self, request: &Request, handle: F) -> Result<T>
    where
        F: FnOnce(&mut Session<C>) -> Result<T>,
    {
        let flags = self.config.flags.with_persist();
        let message = encode_request(request, flags)?;

        tracing::trace!(
            function = ?request.function(),
            path = request.path().unwrap_or(""),
            flags = %flags,
            bytes = message.len(),
            "Sending request"
        );

        let result = transact(&mut self.session, &message, handle);
        match &result {
            Ok(_) => self.session.close(false),
            Err(e) => {
                tracing::debug!("{:?} failed: {}", request.function(), e);
                self.session.close(true);
            }
        }
        result
    }
}

fn transact<C, T, F>(session: &mut Session<C>, message: &[u8], handle: F) -> Result<T>
where
    C: Connector,
    F: FnOnce(&mut Session<C>) -> Result<T>,
{
    session.ensure_connected()?;
    session.send(message)?;
    handle(session)
}

/// Negative return codes become `OwError::Server`
fn check_return(header: &ResponseHeader) -> Result<()> {
    if header.is_error() {
        return Err(OwError::Server {
            code: header.ret_value,
        });
    }
    Ok(())
}

/// Receive and decode a single value; empty when the server sent no payload
fn receive_value<C: Connector>(session: &mut Session<C>, header: &ResponseHeader) -> Result<String> {
    if header.payload_len <= 0 {
        return Ok(String::new());
    }
    let payload = session.receive_payload(header)?;
    decode_payload(header, &payload)
}

/// Split a comma-joined listing, dropping trailing empty entries
fn split_entries(listing: &str) -> Vec<String> {
    let mut entries: Vec<String> = listing.split(',').map(str::to_string).collect();
    while entries.last().is_some_and(|e| e.is_empty()) {
        entries.pop();
    }
    entries
}
