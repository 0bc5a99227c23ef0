//! One-shot delayed wake-ups for cosmetic phase pacing.
//!
//! The battle engine never sleeps. When a phase should auto-advance after a
//! delay it hands a [`Wake`] token to the host's [`Scheduler`], and the host
//! feeds the token back through `BattleEngine::handle_wake` once the delay has
//! elapsed. Tokens carry the epoch of the phase that requested them, so wakes
//! that arrive late, twice, or after the session moved on are ignored.

use std::collections::VecDeque;

/// Phase that resumes when a wake fires.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum WakePhase {
    /// Present the next problem.
    TurnStart,
    /// Let the surviving enemy strike back.
    EnemyAttack,
    /// Leave the victory screen for the shop or the next battle.
    AfterVictory,
}

/// Token handed to the scheduler and returned when the delay elapses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Wake {
    pub phase: WakePhase,
    pub epoch: u64,
}

impl Wake {
    pub const fn new(phase: WakePhase, epoch: u64) -> Self {
        Self { phase, epoch }
    }
}

/// Host-provided timer for one-shot delayed wakes.
///
/// Implementations must not call back into the engine synchronously; the wake
/// is delivered later through `BattleEngine::handle_wake`.
pub trait Scheduler {
    fn schedule(&mut self, delay_ms: u64, wake: Wake);
}

/// Scheduler that only records requests.
///
/// Headless hosts and tests pop wakes and deliver them whenever they choose,
/// which makes pacing fully deterministic.
#[derive(Clone, Debug, Default)]
pub struct QueuedScheduler {
    pending: VecDeque<(u64, Wake)>,
}

impl QueuedScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes the oldest pending wake.
    pub fn pop(&mut self) -> Option<Wake> {
        self.pending.pop_front().map(|(_, wake)| wake)
    }

    /// Removes the oldest pending wake along with its requested delay.
    pub fn pop_with_delay(&mut self) -> Option<(u64, Wake)> {
        self.pending.pop_front()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }
}

impl Scheduler for QueuedScheduler {
    fn schedule(&mut self, delay_ms: u64, wake: Wake) {
        self.pending.push_back((delay_ms, wake));
    }
}

impl<S: Scheduler + ?Sized> Scheduler for &mut S {
    fn schedule(&mut self, delay_ms: u64, wake: Wake) {
        (**self).schedule(delay_ms, wake);
    }
}

impl<S: Scheduler + ?Sized> Scheduler for Box<S> {
    fn schedule(&mut self, delay_ms: u64, wake: Wake) {
        (**self).schedule(delay_ms, wake);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn queued_scheduler_is_fifo() {
        let mut scheduler = QueuedScheduler::new();
        scheduler.schedule(1_000, Wake::new(WakePhase::TurnStart, 1));
        scheduler.schedule(2_000, Wake::new(WakePhase::EnemyAttack, 2));

        assert_eq!(scheduler.len(), 2);
        assert_eq!(
            scheduler.pop_with_delay(),
            Some((1_000, Wake::new(WakePhase::TurnStart, 1)))
        );
        assert_eq!(scheduler.pop(), Some(Wake::new(WakePhase::EnemyAttack, 2)));
        assert!(scheduler.is_empty());
    }
}
