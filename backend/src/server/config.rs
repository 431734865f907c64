//! HTTP server configuration object.

use std::net::SocketAddr;

use backend::ServerSettings;

/// Resolved configuration for creating the HTTP server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) max_batch: usize,
}

impl ServerConfig {
    /// Construct a server configuration.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, max_batch: usize) -> Self {
        Self {
            bind_addr,
            max_batch,
        }
    }

    /// Resolve loaded settings into a configuration.
    ///
    /// # Errors
    /// Returns [`std::io::Error`] with `InvalidInput` when the host is not an
    /// IP address.
    pub fn from_settings(settings: &ServerSettings) -> std::io::Result<Self> {
        let bind_addr = settings.bind_addr().map_err(|err| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("invalid bind host '{}': {err}", settings.host()),
            )
        })?;
        Ok(Self::new(bind_addr, settings.max_batch()))
    }
}
