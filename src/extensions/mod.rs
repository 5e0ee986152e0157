//! Hook points for hosts that observe a session without owning it.

pub mod observers;

pub use observers::{SessionContext, SessionEvent, SessionObserver};
