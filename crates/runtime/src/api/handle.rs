//! Cloneable façade for issuing commands to the runtime.
//!
//! [`RuntimeHandle`] hides channel plumbing and offers async helpers for
//! playing the session or streaming events from specific topics.
use std::collections::HashMap;

use tokio::sync::{broadcast, mpsc, oneshot};

use game_core::{BattleSession, Command, SaveSnapshot};

use super::errors::{Result, RuntimeError};
use crate::events::{Event, EventBus, Topic};
use crate::workers::Request;

/// Client-facing handle to interact with the runtime
#[derive(Clone)]
pub struct RuntimeHandle {
    request_tx: mpsc::Sender<Request>,
    event_bus: EventBus,
}

impl RuntimeHandle {
    pub(crate) fn new(request_tx: mpsc::Sender<Request>, event_bus: EventBus) -> Self {
        Self {
            request_tx,
            event_bus,
        }
    }

    /// Restore the saved slot (when persistence is on) and begin the battle.
    ///
    /// Subscribe before calling this to see the first events.
    pub async fn start(&self) -> Result<()> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.request(Request::Start { reply: reply_tx }).await?;
        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)?
    }

    /// Send any player command. Wrong-state commands come back as
    /// [`RuntimeError::Rejected`] and leave the session unchanged.
    pub async fn send(&self, command: Command) -> Result<()> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.request(Request::Play {
            command,
            reply: reply_tx,
        })
        .await?;
        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)?
    }

    pub async fn submit_answer(&self, value: i32) -> Result<()> {
        self.send(Command::SubmitAnswer { value }).await
    }

    pub async fn purchase_item(&self, id: impl Into<String>) -> Result<()> {
        self.send(Command::PurchaseItem { id: id.into() }).await
    }

    pub async fn close_shop(&self) -> Result<()> {
        self.send(Command::CloseShop).await
    }

    /// Query the persistable view of the session
    pub async fn snapshot(&self) -> Result<SaveSnapshot> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.request(Request::Snapshot { reply: reply_tx }).await?;
        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Query the live session (read-only copy)
    pub async fn session(&self) -> Result<BattleSession> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.request(Request::Session { reply: reply_tx }).await?;
        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Subscribe to events from a specific topic
    ///
    /// # Topics
    ///
    /// - `Topic::Battle` - Everything the engine emits, in order
    /// - `Topic::Persistence` - Restore and autosave outcomes
    /// - `Topic::Command` - Rejected commands
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use runtime::{Event, Topic};
    ///
    /// let mut battle_rx = handle.subscribe(Topic::Battle);
    /// handle.start().await?;
    /// while let Ok(Event::Battle(event)) = battle_rx.recv().await {
    ///     println!("{}", event.name());
    /// }
    /// ```
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.event_bus.subscribe(topic)
    }

    /// Subscribe to multiple topics at once
    ///
    /// Returns a map of topic to receiver for each requested topic.
    pub fn subscribe_multiple(&self, topics: &[Topic]) -> HashMap<Topic, broadcast::Receiver<Event>> {
        self.event_bus.subscribe_multiple(topics)
    }

    /// Get a reference to the event bus for advanced usage
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }

    pub(crate) async fn shutdown(&self) -> Result<()> {
        self.request(Request::Shutdown).await
    }

    async fn request(&self, request: Request) -> Result<()> {
        self.request_tx
            .send(request)
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)
    }
}
