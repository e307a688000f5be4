//! Print storefront: gallery, cart, simulated checkout and local print
//! management over a durable key-value store.

pub mod config;
pub mod storefront;

pub use config::StorefrontConfig;
pub use storefront::Storefront;
