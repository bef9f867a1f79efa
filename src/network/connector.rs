//! Connectors
//!
//! How a session obtains a fresh byte stream to the server.

use std::io::{Read, Write};
use std::net::TcpStream;
use std::time::Duration;

use crate::error::{OwError, Result};

/// Opens streams to an owserver
pub trait Connector {
    /// Stream type produced by this connector
    type Stream: Read + Write;

    /// Open a new stream to `host:port`, applying the read timeout
    fn connect(&mut self, host: &str, port: u16, read_timeout: Option<Duration>)
        -> Result<Self::Stream>;

    /// Change the read timeout of an already open stream
    fn set_read_timeout(&self, _stream: &Self::Stream, _timeout: Option<Duration>) -> Result<()> {
        Ok(())
    }
}

/// Plain TCP connector
#[derive(Debug, Clone, Copy, Default)]
pub struct TcpConnector;

impl Connector for TcpConnector {
    type Stream = TcpStream;

    fn connect(
        &mut self,
        host: &str,
        port: u16,
        read_timeout: Option<Duration>,
    ) -> Result<TcpStream> {
        let stream = TcpStream::connect((host, port)).map_err(|source| OwError::Connect {
            addr: format!("{}:{}", host, port),
            source,
        })?;

        // Disable Nagle's algorithm, requests are small and latency bound
        stream.set_nodelay(true)?;
        stream.set_read_timeout(read_timeout)?;

        Ok(stream)
    }

    fn set_read_timeout(&self, stream: &TcpStream, timeout: Option<Duration>) -> Result<()> {
        stream.set_read_timeout(timeout)?;
        Ok(())
    }
}
