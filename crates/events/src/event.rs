use chrono::{DateTime, Utc};

/// A domain-agnostic change event.
///
/// Events are **immutable** facts describing a mutation that already happened.
pub trait Event: Clone + core::fmt::Debug + Send + Sync + 'static {
    /// Stable event name/type identifier (e.g. "catalog.product.uploaded").
    fn event_type(&self) -> &'static str;

    /// When the change occurred.
    fn occurred_at(&self) -> DateTime<Utc>;
}
