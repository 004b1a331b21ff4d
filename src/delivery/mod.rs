//! The two ways of putting documentation in front of the user.

pub mod opener;
pub mod served;
pub mod static_open;

pub use opener::{Opener, SystemOpener};
pub use served::ServedDelivery;
pub use static_open::StaticDelivery;
