//! Application services: the locale store, the switch control and the
//! content that follows the active locale.

pub mod about;
pub mod error;
pub(crate) mod lock;
pub mod repos;
pub mod store;
pub mod switch;
