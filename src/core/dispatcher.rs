//! The single decision point: pick one delivery strategy and run it.

use std::fmt;

use crate::platform::{PlatformIdentifier, PlatformProbe, LINUX};

/// A way of making the documentation available to the user.
///
/// `launch` blocks for the strategy's natural lifetime: indefinitely for a
/// server, briefly for a viewer hand-off.
pub trait DeliveryStrategy {
    type Error;

    fn launch(&self) -> Result<(), Self::Error>;
}

impl<S: DeliveryStrategy + ?Sized> DeliveryStrategy for &S {
    type Error = S::Error;

    fn launch(&self) -> Result<(), Self::Error> {
        (**self).launch()
    }
}

/// Outcome of the dispatch decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Delivery {
    /// Serve the tree over a local HTTP address.
    Served,
    /// Open the index file directly with the default viewer.
    Static,
}

impl Delivery {
    /// The decision table. Only the Linux family is served; every other
    /// identifier, including unknown or malformed ones, opens directly.
    pub fn for_platform(platform: &PlatformIdentifier) -> Self {
        match platform.as_str() {
            LINUX => Self::Served,
            _ => Self::Static,
        }
    }
}

impl fmt::Display for Delivery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Served => f.write_str("served"),
            Self::Static => f.write_str("static"),
        }
    }
}

/// Routes one launch request to exactly one of two strategies.
///
/// The dispatcher holds no state of its own: every call to [`Dispatcher::run`]
/// reads the platform again and performs a fresh decision.
pub struct Dispatcher<P, S, T> {
    probe: P,
    served: S,
    direct: T,
}

impl<P, S, T> Dispatcher<P, S, T>
where
    P: PlatformProbe,
    S: DeliveryStrategy,
    T: DeliveryStrategy<Error = S::Error>,
{
    pub fn new(probe: P, served: S, direct: T) -> Self {
        Self {
            probe,
            served,
            direct,
        }
    }

    /// Reads the platform once, launches the matching strategy once and
    /// returns its outcome untouched.
    pub fn run(&self) -> Result<(), S::Error> {
        let platform = self.probe.read();
        let delivery = Delivery::for_platform(&platform);
        tracing::info!(%platform, %delivery, "Dispatching documentation delivery");

        match delivery {
            Delivery::Served => self.served.launch(),
            Delivery::Static => self.direct.launch(),
        }
    }
}
