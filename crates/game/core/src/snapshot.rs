//! Persistable view of a session.
//!
//! A snapshot carries everything needed to resume between battles: the full
//! player record, the battle counter and the cumulative statistics. Transient
//! battle state (current enemy, open problem, phase) is never saved; a restored
//! session always resumes at the start of a battle. A session saved after a
//! kill (in `Victory` or `Shopping`) is saved at the next battle, since the
//! rewards for the won one are already in the player record.

use crate::error::{ErrorSeverity, GameError};
use crate::state::{BattleSession, BattleState, Player, SessionStats};

/// Serializable session snapshot.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SaveSnapshot {
    pub player: Player,
    pub battle_number: u32,
    pub max_battles: u32,
    pub stats: SessionStats,
}

impl SaveSnapshot {
    /// Checks the invariants a live session relies on.
    pub fn validate(&self) -> Result<(), SnapshotError> {
        let stats = &self.player.stats;
        if stats.max_hp == 0 {
            return Err(SnapshotError::malformed("player max hp is zero"));
        }
        if stats.hp > stats.max_hp {
            return Err(SnapshotError::malformed(format!(
                "player hp {} exceeds max hp {}",
                stats.hp, stats.max_hp
            )));
        }
        if self.player.is_defeated() {
            return Err(SnapshotError::malformed("player is defeated"));
        }
        if self.player.level == 0 {
            return Err(SnapshotError::malformed("player level is zero"));
        }
        if self.player.exp_to_next == 0 {
            return Err(SnapshotError::malformed("exp threshold is zero"));
        }
        if self.max_battles == 0 {
            return Err(SnapshotError::malformed("max battles is zero"));
        }
        if self.battle_number == 0 || self.battle_number > self.max_battles + 1 {
            return Err(SnapshotError::malformed(format!(
                "battle number {} outside 1..={}",
                self.battle_number,
                self.max_battles + 1
            )));
        }
        if self.stats.problems_correct > self.stats.problems_attempted {
            return Err(SnapshotError::malformed(
                "more correct answers than attempts",
            ));
        }
        Ok(())
    }

    /// Rebuilds a session positioned at the start of its current battle.
    pub fn into_session(self) -> Result<BattleSession, SnapshotError> {
        self.validate()?;
        let mut session = BattleSession::new(self.player, self.max_battles);
        session.battle_number = self.battle_number;
        session.stats = self.stats;
        Ok(session)
    }
}

impl From<&BattleSession> for SaveSnapshot {
    fn from(session: &BattleSession) -> Self {
        let battle_number = match session.state {
            BattleState::Victory | BattleState::Shopping => session.battle_number + 1,
            _ => session.battle_number,
        };
        Self {
            player: session.player.clone(),
            battle_number,
            max_battles: session.max_battles,
            stats: session.stats.clone(),
        }
    }
}

/// Errors raised while restoring a snapshot.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SnapshotError {
    #[error("malformed snapshot: {reason}")]
    MalformedSnapshot { reason: String },
}

impl SnapshotError {
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedSnapshot {
            reason: reason.into(),
        }
    }
}

impl GameError for SnapshotError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::MalformedSnapshot { .. } => "MALFORMED_SNAPSHOT",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> SaveSnapshot {
        let mut player = Player::default();
        player.level = 3;
        player.exp = 42;
        player.exp_to_next = 225;
        player.gold = 180;
        player.stats.hp = 77;
        player.stats.max_hp = 140;

        SaveSnapshot {
            player,
            battle_number: 5,
            max_battles: 10,
            stats: SessionStats {
                problems_attempted: 12,
                problems_correct: 9,
                enemies_defeated: 4,
                bosses_defeated: 1,
                highest_difficulty: 3,
            },
        }
    }

    #[test]
    fn restore_then_snapshot_is_identity() {
        let snapshot = sample();
        let session = snapshot.clone().into_session().unwrap();

        assert_eq!(SaveSnapshot::from(&session), snapshot);
        assert!(session.enemy.is_none());
        assert!(!session.is_new_game());
    }

    #[test]
    fn rejects_hp_above_max() {
        let mut snapshot = sample();
        snapshot.player.stats.hp = 500;

        let err = snapshot.validate().unwrap_err();
        assert_eq!(err.error_code(), "MALFORMED_SNAPSHOT");
        assert!(err.to_string().contains("exceeds max hp"));
    }

    #[test]
    fn rejects_battle_number_out_of_range() {
        let mut snapshot = sample();
        snapshot.battle_number = 0;
        assert!(snapshot.validate().is_err());

        snapshot.battle_number = 12;
        assert!(snapshot.validate().is_err());

        // One past the last battle is a finished-but-unreported session.
        snapshot.battle_number = 11;
        assert!(snapshot.validate().is_ok());
    }

    #[test]
    fn rejects_defeated_player() {
        let mut snapshot = sample();
        snapshot.player.stats.hp = 0;

        let err = snapshot.into_session().unwrap_err();
        assert!(err.to_string().contains("defeated"));
    }

    #[test]
    fn won_battle_is_saved_as_the_next_one() {
        let mut session = sample().into_session().unwrap();
        session.state = BattleState::Victory;
        assert_eq!(SaveSnapshot::from(&session).battle_number, 6);

        session.state = BattleState::Shopping;
        assert_eq!(SaveSnapshot::from(&session).battle_number, 6);

        session.state = BattleState::EnemyTurn;
        assert_eq!(SaveSnapshot::from(&session).battle_number, 5);
    }

    #[test]
    fn rejects_zero_level() {
        let mut snapshot = sample();
        snapshot.player.level = 0;
        assert!(snapshot.into_session().is_err());
    }
}
