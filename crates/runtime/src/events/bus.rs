//! Topic-based event bus implementation.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::broadcast;

use game_core::BattleEvent;

use super::types::{CommandRejected, PersistenceEvent};

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Topic {
    /// Everything the battle engine emits, in order
    Battle,
    /// Save and restore outcomes
    Persistence,
    /// Rejected commands
    Command,
}

impl Topic {
    pub const ALL: [Topic; 3] = [Topic::Battle, Topic::Persistence, Topic::Command];
}

/// Event wrapper that carries the topic and typed event
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "topic", content = "event", rename_all = "snake_case")]
pub enum Event {
    Battle(BattleEvent),
    Persistence(PersistenceEvent),
    Command(CommandRejected),
}

impl Event {
    pub fn topic(&self) -> Topic {
        match self {
            Event::Battle(_) => Topic::Battle,
            Event::Persistence(_) => Topic::Persistence,
            Event::Command(_) => Topic::Command,
        }
    }
}

struct Channels {
    battle: broadcast::Sender<Event>,
    persistence: broadcast::Sender<Event>,
    command: broadcast::Sender<Event>,
}

/// Topic-based event bus
///
/// Allows consumers to subscribe to specific topics and only receive
/// events they care about. Channels are created up front and never change,
/// so publishing never waits on a lock.
pub struct EventBus {
    channels: Arc<Channels>,
}

impl EventBus {
    /// Creates a new event bus with default capacity for each topic
    pub fn new() -> Self {
        Self::with_capacity(256)
    }

    /// Creates a new event bus with specified capacity per topic
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let channels = Channels {
            battle: broadcast::channel(capacity).0,
            persistence: broadcast::channel(capacity).0,
            command: broadcast::channel(capacity).0,
        };

        Self {
            channels: Arc::new(channels),
        }
    }

    fn sender(&self, topic: Topic) -> &broadcast::Sender<Event> {
        match topic {
            Topic::Battle => &self.channels.battle,
            Topic::Persistence => &self.channels.persistence,
            Topic::Command => &self.channels.command,
        }
    }

    /// Publish an event to its corresponding topic
    pub fn publish(&self, event: Event) {
        let topic = event.topic();
        if self.sender(topic).send(event).is_err() {
            // No subscribers for this topic - this is normal, not an error
            tracing::trace!("No subscribers for topic {:?}", topic);
        }
    }

    /// Subscribe to a specific topic
    ///
    /// Returns a receiver that will only receive events for that topic.
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.sender(topic).subscribe()
    }

    /// Subscribe to multiple topics
    ///
    /// Returns receivers for each requested topic.
    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> HashMap<Topic, broadcast::Receiver<Event>> {
        topics
            .iter()
            .map(|&topic| (topic, self.subscribe(topic)))
            .collect()
    }
}

impl Clone for EventBus {
    fn clone(&self) -> Self {
        Self {
            channels: Arc::clone(&self.channels),
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rejected() -> Event {
        Event::Command(CommandRejected {
            command: "close-shop".to_string(),
            code: "INVALID_COMMAND".to_string(),
            reason: "not shopping".to_string(),
        })
    }

    #[tokio::test]
    async fn subscribers_only_see_their_topic() {
        let bus = EventBus::with_capacity(8);
        let mut battle = bus.subscribe(Topic::Battle);
        let mut commands = bus.subscribe(Topic::Command);

        bus.publish(rejected());

        assert!(matches!(commands.recv().await.unwrap(), Event::Command(_)));
        assert!(battle.try_recv().is_err());
    }

    #[test]
    fn publish_without_subscribers_is_fine() {
        let bus = EventBus::default();
        bus.publish(rejected());
    }

    #[test]
    fn clones_share_channels() {
        let bus = EventBus::with_capacity(4);
        let mut rx = bus.clone().subscribe(Topic::Command);
        bus.publish(rejected());
        assert!(rx.try_recv().is_ok());
    }
}
