//! Serves the documentation tree over a local HTTP address.

use std::future::Future;
use std::io;
use std::net::SocketAddr;

use super::opener::{Opener, SystemOpener};
use crate::config::{LauncherConfig, ServeConfig};
use crate::core::{DeliveryStrategy, DocsError, DocsLocator};
use crate::server::DocServer;

pub struct ServedDelivery<O = SystemOpener> {
    config: ServeConfig,
    locator: DocsLocator,
    opener: O,
}

impl ServedDelivery<SystemOpener> {
    pub fn from_config(config: &LauncherConfig) -> Self {
        Self::new(
            config.serve.clone(),
            DocsLocator::from_config(config),
            SystemOpener,
        )
    }
}

impl<O: Opener> ServedDelivery<O> {
    pub fn new(config: ServeConfig, locator: DocsLocator, opener: O) -> Self {
        Self {
            config,
            locator,
            opener,
        }
    }

    /// Locates the tree, binds, announces the URL and serves until `shutdown`
    /// resolves.
    pub async fn serve<F>(&self, shutdown: F) -> Result<(), DocsError>
    where
        F: Future<Output = io::Result<()>>,
    {
        let tree = self.locator.locate()?;
        let server = DocServer::bind(tree.root(), &self.config.host, self.config.port).await?;
        let url = browse_url(&self.config.host, server.local_addr()?);

        tracing::info!("Serving documentation from {:?} at {}", server.root(), url);
        tracing::info!("Press Ctrl+C to stop the server");

        if self.config.open_browser {
            if let Err(e) = self.opener.open(&url) {
                tracing::warn!("Could not open a browser at {}: {}", url, e);
            }
        }

        server.run_until(shutdown).await
    }
}

impl<O: Opener> DeliveryStrategy for ServedDelivery<O> {
    type Error = DocsError;

    fn launch(&self) -> Result<(), DocsError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
            .map_err(DocsError::Runtime)?;
        runtime.block_on(self.serve(tokio::signal::ctrl_c()))
    }
}

/// The address a browser on this machine should use. Wildcard binds are
/// reached through `localhost`.
fn browse_url(host: &str, addr: SocketAddr) -> String {
    let host = if addr.ip().is_unspecified() {
        "localhost".to_string()
    } else if host.parse::<std::net::IpAddr>().is_err() && !host.is_empty() {
        host.to_string()
    } else if addr.is_ipv6() {
        format!("[{}]", addr.ip())
    } else {
        addr.ip().to_string()
    };
    format!("http://{}:{}/", host, addr.port())
}
