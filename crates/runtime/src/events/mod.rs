//! Topic-based event bus for runtime events.
//!
//! Engine notifications are published to the [`Topic::Battle`] topic in emit
//! order; persistence and command bookkeeping get topics of their own, so a
//! consumer only receives what it subscribes to.

mod bus;
mod presenter;
mod types;

pub use bus::{Event, EventBus, Topic};
pub use presenter::BusPresenter;
pub use types::{CommandRejected, PersistenceEvent};
