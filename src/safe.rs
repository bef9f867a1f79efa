//! Error-swallowing forms of the client operations
//!
//! For callers that only want a best-effort value: every failure is logged
//! at debug level and replaced by a neutral default (`""`, `false`, empty list).

use crate::client::OwClient;
use crate::error::Result;
use crate::network::Connector;

impl<C: Connector> OwClient<C> {
    /// `read`, returning an empty string on any error
    pub fn safe_read(&mut self, path: &str) -> String {
        or_default("read", path, self.read(path))
    }

    /// `write`, returning whether it succeeded
    pub fn safe_write(&mut self, path: &str, value: &str) -> bool {
        or_default("write", path, self.write(path, value).map(|()| true))
    }

    /// `presence`, returning false when missing or on any error
    pub fn safe_presence(&mut self, path: &str) -> bool {
        or_default("presence", path, self.presence(path))
    }

    /// `dir`, returning an empty list on any error
    pub fn safe_dir(&mut self, path: &str) -> Vec<String> {
        or_default("dir", path, self.dir(path))
    }

    /// `dir_all`, returning an empty list on any error
    pub fn safe_dir_all(&mut self, path: &str) -> Vec<String> {
        or_default("dir_all", path, self.dir_all(path))
    }

    /// `get`, returning an empty string on any error
    pub fn safe_get(&mut self, path: &str) -> String {
        or_default("get", path, self.get(path))
    }

    /// `connect`, returning whether it succeeded
    pub fn safe_connect(&mut self) -> bool {
        let addr = self.config().addr();
        or_default("connect", &addr, self.connect().map(|()| true))
    }

    /// `disconnect`; closing cannot fail, kept for symmetry with `safe_connect`
    pub fn safe_disconnect(&mut self) -> bool {
        self.disconnect();
        true
    }
}

fn or_default<T: Default>(op: &str, target: &str, result: Result<T>) -> T {
    result.unwrap_or_else(|e| {
        tracing::debug!("Ignoring {} error on {}: {}", op, target, e);
        T::default()
    })
}
