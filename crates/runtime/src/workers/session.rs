//! Session worker that owns the authoritative [`BattleEngine`].
//!
//! Receives requests from [`crate::RuntimeHandle`], feeds commands and wakes
//! to the engine one at a time, and performs the side effects around it:
//! slot restore and autosave, rejection reports, the completion callback.

use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, Utc};
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, error, info, trace, warn};

use game_core::engine::outcome;
use game_core::{
    BattleEngine, BattleSession, BattleState, Command, CommandError, GameError, PcgRng,
    SaveSnapshot, Wake,
};

use super::scheduler::TokioScheduler;
use crate::api::{CompletionCallback, CompletionReport, Result, RuntimeError};
use crate::events::{BusPresenter, CommandRejected, Event, EventBus, PersistenceEvent};
use crate::repository::{SaveRecord, SaveRepository};

pub(crate) type Engine = BattleEngine<PcgRng, BusPresenter, TokioScheduler>;

/// Requests that can be sent to the session worker
pub(crate) enum Request {
    /// Restore the slot (if any) and begin the current battle.
    Start { reply: oneshot::Sender<Result<()>> },
    /// Apply a player command.
    Play {
        command: Command,
        reply: oneshot::Sender<Result<()>>,
    },
    /// Query the persistable view of the session.
    Snapshot { reply: oneshot::Sender<SaveSnapshot> },
    /// Query the full live session (read-only copy).
    Session { reply: oneshot::Sender<BattleSession> },
    Shutdown,
}

/// What an engine step is compared against to decide on side effects.
#[derive(Clone, Copy)]
struct Progress {
    enemies_defeated: u32,
    state: BattleState,
    completed: bool,
}

impl Progress {
    fn of(engine: &Engine) -> Self {
        Self {
            enemies_defeated: engine.session().stats.enemies_defeated,
            state: engine.state(),
            completed: engine.is_completed(),
        }
    }
}

/// Background task that drives one battle session.
pub(crate) struct SessionWorker {
    engine: Engine,
    request_rx: mpsc::Receiver<Request>,
    wake_rx: mpsc::UnboundedReceiver<Wake>,
    event_bus: EventBus,
    repository: Option<Arc<dyn SaveRepository>>,
    slot: String,
    created_at: DateTime<Utc>,
    play_time_base: u64,
    started_at: Instant,
    on_complete: Option<CompletionCallback>,
}

impl SessionWorker {
    pub(crate) fn new(
        engine: Engine,
        request_rx: mpsc::Receiver<Request>,
        wake_rx: mpsc::UnboundedReceiver<Wake>,
        event_bus: EventBus,
        repository: Option<Arc<dyn SaveRepository>>,
        slot: String,
        on_complete: Option<CompletionCallback>,
    ) -> Self {
        info!(
            target: "runtime::session",
            slot = %slot,
            persistence = repository.is_some(),
            max_battles = engine.session().max_battles,
            "session worker initialized"
        );

        Self {
            engine,
            request_rx,
            wake_rx,
            event_bus,
            repository,
            slot,
            created_at: Utc::now(),
            play_time_base: 0,
            started_at: Instant::now(),
            on_complete,
        }
    }

    /// Main worker loop.
    ///
    /// Ends on [`Request::Shutdown`] or once every handle is dropped, saving
    /// first when the shop is open. Pending timers are aborted with the
    /// scheduler.
    pub(crate) async fn run(mut self) {
        loop {
            tokio::select! {
                request = self.request_rx.recv() => match request {
                    Some(Request::Shutdown) | None => {
                        self.save_on_exit();
                        break;
                    }
                    Some(request) => self.handle_request(request),
                },
                Some(wake) = self.wake_rx.recv() => self.handle_wake(wake),
            }
        }

        self.engine.scheduler_mut().cancel();
        debug!(target: "runtime::session", slot = %self.slot, "session worker stopped");
    }

    fn handle_request(&mut self, request: Request) {
        match request {
            Request::Start { reply } => {
                let result = self.start();
                if reply.send(result).is_err() {
                    debug!("Start reply channel closed (caller dropped)");
                }
            }
            Request::Play { command, reply } => {
                let result = self.play(command);
                if reply.send(result).is_err() {
                    debug!("Play reply channel closed (caller dropped)");
                }
            }
            Request::Snapshot { reply } => {
                if reply.send(self.engine.snapshot()).is_err() {
                    debug!("Snapshot reply channel closed (caller dropped)");
                }
            }
            Request::Session { reply } => {
                if reply.send(self.engine.session().clone()).is_err() {
                    debug!("Session reply channel closed (caller dropped)");
                }
            }
            // Handled by the loop.
            Request::Shutdown => {}
        }
    }

    fn start(&mut self) -> Result<()> {
        if !self.engine.is_started() {
            self.restore_slot();
            self.started_at = Instant::now();
        }

        let before = Progress::of(&self.engine);
        self.engine
            .start()
            .map_err(|error| self.reject("start", error))?;

        info!(
            target: "runtime::session",
            battle = self.engine.session().battle_number,
            level = self.engine.session().player.level,
            "session started"
        );
        self.after_step(before);
        Ok(())
    }

    fn play(&mut self, command: Command) -> Result<()> {
        let name = command.name();
        let before = Progress::of(&self.engine);

        match self.engine.handle_command(command) {
            Ok(()) => {
                debug!(target: "runtime::session", command = name, state = ?self.engine.state(), "command applied");
                self.after_step(before);
                Ok(())
            }
            Err(error) => Err(self.reject(name, error)),
        }
    }

    fn handle_wake(&mut self, wake: Wake) {
        let before = Progress::of(&self.engine);

        match self.engine.handle_wake(wake) {
            Ok(true) => self.after_step(before),
            Ok(false) => {
                trace!(target: "runtime::session", phase = %wake.phase, epoch = wake.epoch, "stale wake ignored");
            }
            Err(error) => {
                error!(
                    target: "runtime::session",
                    phase = %wake.phase,
                    code = error.error_code(),
                    severity = error.severity().as_str(),
                    "wake failed: {error}"
                );
            }
        }
    }

    /// Logs and publishes a refused command; the session is unchanged.
    fn reject(&self, command: &str, error: CommandError) -> RuntimeError {
        warn!(
            target: "runtime::session",
            command,
            code = error.error_code(),
            severity = error.severity().as_str(),
            "command rejected: {error}"
        );

        self.event_bus.publish(Event::Command(CommandRejected {
            command: command.to_string(),
            code: error.error_code().to_string(),
            reason: error.to_string(),
        }));

        RuntimeError::Rejected(error)
    }

    /// Autosaves after a defeated enemy, after leaving the shop and on
    /// completion; fires the completion callback once.
    fn after_step(&mut self, before: Progress) {
        let after = Progress::of(&self.engine);
        let completed = after.completed && !before.completed;
        let defeated_enemy = after.enemies_defeated > before.enemies_defeated;
        let left_shop = before.state == BattleState::Shopping && after.state != BattleState::Shopping;

        if defeated_enemy || left_shop || completed {
            self.autosave();
        }
        if completed {
            self.finish(after.state == BattleState::Won);
        }
    }

    /// Keeps purchases made in a shop that is still open.
    fn save_on_exit(&self) {
        if self.engine.state() == BattleState::Shopping {
            self.autosave();
        }
    }

    fn restore_slot(&mut self) {
        let Some(repository) = self.repository.clone() else {
            return;
        };

        match repository.load(&self.slot) {
            Ok(None) => {
                debug!(target: "runtime::persistence", slot = %self.slot, "no saved session");
            }
            Ok(Some(record)) if is_finished(&record.snapshot) => {
                info!(
                    target: "runtime::persistence",
                    slot = %self.slot,
                    "saved session already finished; starting a new game"
                );
            }
            Ok(Some(record)) => {
                let battle_number = record.snapshot.battle_number;
                let level = record.snapshot.player.level;
                match self.engine.restore(record.snapshot) {
                    Ok(()) => {
                        self.created_at = record.created_at;
                        self.play_time_base = record.play_time_seconds;
                        info!(
                            target: "runtime::persistence",
                            slot = %self.slot,
                            battle_number,
                            level,
                            "session restored"
                        );
                        self.publish(PersistenceEvent::Restored {
                            slot: self.slot.clone(),
                            battle_number,
                            level,
                        });
                    }
                    Err(error) => self.restore_failed(error.to_string()),
                }
            }
            Err(error) => self.restore_failed(error.to_string()),
        }
    }

    fn restore_failed(&self, reason: String) {
        warn!(
            target: "runtime::persistence",
            slot = %self.slot,
            "cannot restore saved session, starting a new game: {reason}"
        );
        self.publish(PersistenceEvent::RestoreFailed {
            slot: self.slot.clone(),
            reason,
        });
    }

    fn autosave(&self) {
        let Some(repository) = &self.repository else {
            return;
        };

        let snapshot = self.engine.snapshot();
        let battle_number = snapshot.battle_number;
        let result = SaveRecord::with_times(
            snapshot,
            self.created_at,
            Utc::now(),
            self.play_time_base + self.elapsed_seconds(),
        )
        .and_then(|record| repository.save(&self.slot, &record));

        match result {
            Ok(()) => {
                debug!(target: "runtime::persistence", slot = %self.slot, battle_number, "autosaved");
                self.publish(PersistenceEvent::Saved {
                    slot: self.slot.clone(),
                    battle_number,
                });
            }
            Err(error) => {
                warn!(target: "runtime::persistence", slot = %self.slot, "autosave failed: {error}");
                self.publish(PersistenceEvent::SaveFailed {
                    slot: self.slot.clone(),
                    reason: error.to_string(),
                });
            }
        }
    }

    fn finish(&mut self, victory: bool) {
        let summary = outcome::summarize(self.engine.session(), victory);
        info!(
            target: "runtime::session",
            victory,
            final_score = summary.final_score,
            "session completed"
        );

        let Some(callback) = self.on_complete.take() else {
            return;
        };
        callback(CompletionReport {
            victory,
            final_score: summary.final_score,
            achievements: summary.achievements,
            elapsed_seconds: self.elapsed_seconds(),
        });
    }

    fn elapsed_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }

    fn publish(&self, event: PersistenceEvent) {
        self.event_bus.publish(Event::Persistence(event));
    }
}

/// A save that can no longer be played: the hero fell or every battle was won.
fn is_finished(snapshot: &SaveSnapshot) -> bool {
    snapshot.player.is_defeated() || snapshot.battle_number > snapshot.max_battles
}
