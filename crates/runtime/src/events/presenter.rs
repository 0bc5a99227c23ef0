//! Engine-facing presenter that forwards every event onto the bus.

use game_core::{BattleEvent, Presenter};

use super::{Event, EventBus};

/// Marshals engine events to [`super::Topic::Battle`] subscribers.
///
/// Performs no game logic; it only tags and forwards.
#[derive(Clone)]
pub struct BusPresenter {
    bus: EventBus,
}

impl BusPresenter {
    pub fn new(bus: EventBus) -> Self {
        Self { bus }
    }
}

impl Presenter for BusPresenter {
    fn present(&mut self, event: BattleEvent) {
        tracing::trace!(target: "runtime::events", event = event.name(), "publish");
        self.bus.publish(Event::Battle(event));
    }
}
