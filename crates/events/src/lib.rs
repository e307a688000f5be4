//! Change events and in-process notification.
//!
//! Stores publish a change event after every effective mutation; views
//! subscribe to re-render. Nothing here persists.

pub mod bus;
pub mod event;
pub mod in_memory_bus;

pub use bus::{ChangeBus, Subscription};
pub use event::Event;
pub use in_memory_bus::{InMemoryBusError, InMemoryChangeBus};
