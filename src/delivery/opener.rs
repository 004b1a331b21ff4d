//! An abstraction over the host's "open with default application" mechanism.

use std::io;

/// Hands a URL or path to the platform's default viewer.
/// This allows a recording implementation during tests, so no browser is
/// spawned.
pub trait Opener: Send + Sync {
    fn open(&self, target: &str) -> io::Result<()>;
}

impl<O: Opener + ?Sized> Opener for &O {
    fn open(&self, target: &str) -> io::Result<()> {
        (**self).open(target)
    }
}

/// The production implementation that uses the `open` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemOpener;

impl Opener for SystemOpener {
    fn open(&self, target: &str) -> io::Result<()> {
        tracing::debug!("Opening {} with the default application", target);
        open::that(target)
    }
}
