//! Network Module
//!
//! TCP transport to owserver.
//!
//! ## Architecture
//! - One blocking stream per session, one request in flight at a time
//! - Streams opened through a `Connector` (TCP by default)
//! - Connection reuse decided by the server's persistence bit

mod connector;
mod session;

pub use connector::{Connector, TcpConnector};
pub use session::{ConnectionMode, Session};
