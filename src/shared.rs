//! Shared client handle
//!
//! Lets several threads use one session. The lock is held for the whole
//! exchange, so at most one request is in flight on the connection.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::client::OwClient;
use crate::config::Config;
use crate::error::Result;
use crate::network::{ConnectionMode, Connector, TcpConnector};

/// Cloneable, thread-safe handle to a single [`OwClient`]
pub struct SharedClient<C: Connector = TcpConnector> {
    inner: Arc<Mutex<OwClient<C>>>,
}

impl SharedClient<TcpConnector> {
    /// Create a shared client for the configured server
    pub fn new(config: Config) -> Self {
        Self::from_client(OwClient::new(config))
    }
}

impl<C: Connector> SharedClient<C> {
    /// Wrap an existing client
    pub fn from_client(client: OwClient<C>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(client)),
        }
    }

    /// Run `f` with exclusive access to the client
    pub fn with<T>(&self, f: impl FnOnce(&mut OwClient<C>) -> T) -> T {
        let mut client = self.inner.lock();
        f(&mut client)
    }

    pub fn mode(&self) -> ConnectionMode {
        self.inner.lock().mode()
    }

    pub fn connect(&self) -> Result<()> {
        self.inner.lock().connect()
    }

    pub fn disconnect(&self) {
        self.inner.lock().disconnect();
    }

    pub fn read(&self, path: &str) -> Result<String> {
        self.inner.lock().read(path)
    }

    pub fn write(&self, path: &str, value: &str) -> Result<()> {
        self.inner.lock().write(path, value)
    }

    pub fn presence(&self, path: &str) -> Result<bool> {
        self.inner.lock().presence(path)
    }

    pub fn dir(&self, path: &str) -> Result<Vec<String>> {
        self.inner.lock().dir(path)
    }

    pub fn dir_all(&self, path: &str) -> Result<Vec<String>> {
        self.inner.lock().dir_all(path)
    }

    pub fn get(&self, path: &str) -> Result<String> {
        self.inner.lock().get(path)
    }

    pub fn ping(&self) -> Result<()> {
        self.inner.lock().ping()
    }
}

impl<C: Connector> Clone for SharedClient<C> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}
