//! # ownet
//!
//! Client for the owserver protocol, used to query and change the state of
//! one-wire devices exposed by a remote owserver daemon:
//! - Fixed 24-byte header codec with length-prefixed payloads
//! - Transient or server-granted persistent TCP sessions
//! - Read, Write, Presence, Get and Nop exchanges
//! - Streaming (`dir`) and single-packet (`dir_all`) directory listings
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │              OwClient / SharedClient / safe_*                │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                   Request Engine                             │
//! │        (one exchange per operation, return codes)            │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │   Session   │          │    Codec    │
//!   │ (TCP, mode) │          │ (header,    │
//!   └─────────────┘          │  payload)   │
//!                            └─────────────┘
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use ownet::{Config, OwClient};
//!
//! let mut client = OwClient::new(Config::builder().host("192.168.1.10").build());
//! let temperature = client.read("/28.0E67C0000000/temperature")?;
//! println!("{}", temperature.trim());
//! for entry in client.dir("/")? {
//!     println!("{}", entry);
//! }
//! # Ok::<(), ownet::OwError>(())
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod protocol;
pub mod network;
pub mod client;
pub mod shared;

mod safe;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{OwError, Result};
pub use config::Config;
pub use client::OwClient;
pub use shared::SharedClient;
pub use network::{ConnectionMode, Connector, TcpConnector};
pub use protocol::{DeviceFormat, Flags, TemperatureScale};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of ownet
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
