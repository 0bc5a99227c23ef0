//! Session bookkeeping: current phase, battle counter and cumulative stats.

use super::{Enemy, Player};

/// Phase of the battle state machine.
///
/// ```text
/// PlayerTurn -> WaitingAnswer -> EnemyTurn | Victory
/// EnemyTurn  -> PlayerTurn | Defeat
/// Victory    -> Shopping | PlayerTurn (next battle) | Won
/// Shopping   -> PlayerTurn (next battle) | Won
/// ```
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::IntoStaticStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum BattleState {
    /// A problem is about to be presented.
    #[default]
    PlayerTurn,
    /// A problem is on screen; only `submit-answer` is accepted.
    WaitingAnswer,
    /// The enemy survived and is about to strike.
    EnemyTurn,
    /// The enemy is down; rewards were applied.
    Victory,
    /// The shop is open; purchases and `close-shop` are accepted.
    Shopping,
    /// Terminal loss.
    Defeat,
    /// Terminal win after the last battle.
    Won,
}

impl BattleState {
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Defeat | Self::Won)
    }
}

/// Cumulative per-session counters, persisted with the snapshot.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SessionStats {
    pub problems_attempted: u32,
    pub problems_correct: u32,
    pub enemies_defeated: u32,
    pub bosses_defeated: u32,
    /// Highest problem difficulty answered correctly (0 when none).
    pub highest_difficulty: u8,
}

impl SessionStats {
    pub fn record_answer(&mut self, correct: bool, difficulty: u8) {
        self.problems_attempted += 1;
        if correct {
            self.problems_correct += 1;
            self.highest_difficulty = self.highest_difficulty.max(difficulty);
        }
    }

    pub fn record_kill(&mut self, is_boss: bool) {
        self.enemies_defeated += 1;
        if is_boss {
            self.bosses_defeated += 1;
        }
    }

    /// Share of correct answers, rounded to a whole percent.
    pub fn accuracy_percent(&self) -> u32 {
        if self.problems_attempted == 0 {
            return 0;
        }
        let correct = self.problems_correct as u64 * 100;
        let attempted = self.problems_attempted as u64;
        ((correct + attempted / 2) / attempted) as u32
    }
}

/// Everything the state machine owns for one session.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleSession {
    pub player: Player,
    pub enemy: Option<Enemy>,
    pub battle_number: u32,
    pub max_battles: u32,
    pub state: BattleState,
    pub stats: SessionStats,
}

impl BattleSession {
    pub fn new(player: Player, max_battles: u32) -> Self {
        Self {
            player,
            enemy: None,
            battle_number: 1,
            max_battles: max_battles.max(1),
            state: BattleState::PlayerTurn,
            stats: SessionStats::default(),
        }
    }

    /// True for a session that has not won a single battle yet.
    pub fn is_new_game(&self) -> bool {
        self.battle_number == 1 && self.stats.enemies_defeated == 0
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_terminal()
    }

    /// Battles completed before the current one.
    pub fn battles_won(&self) -> u32 {
        self.battle_number.saturating_sub(1)
    }
}
