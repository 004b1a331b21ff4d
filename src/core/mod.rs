pub mod dispatcher;
pub mod error;
pub mod locator;

pub use dispatcher::{Delivery, DeliveryStrategy, Dispatcher};
pub use error::DocsError;
pub use locator::{DocsLocator, DocsTree};
