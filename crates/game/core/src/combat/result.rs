//! Combat result types and attack resolution.

use crate::problem::MathProblem;
use crate::state::{Enemy, Player};

use super::damage::{enemy_damage, player_damage};

/// Outcome of an answer submission.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerAttack {
    pub correct: bool,
    /// Zero if and only if the answer was wrong.
    pub damage: u32,
}

/// Outcome of an enemy strike.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnemyAttack {
    /// Always at least 1.
    pub damage: u32,
}

/// Resolve the player's attack for a submitted answer.
///
/// A correct answer deals `max(1, attack + difficulty × 5 - enemy defense)`;
/// a wrong answer deals nothing. The caller applies the damage.
pub fn resolve_player_attack(
    player: &Player,
    enemy: &Enemy,
    problem: &MathProblem,
    answer_given: i32,
) -> PlayerAttack {
    if !problem.is_correct(answer_given) {
        return PlayerAttack {
            correct: false,
            damage: 0,
        };
    }

    PlayerAttack {
        correct: true,
        damage: player_damage(
            player.stats.attack,
            problem.difficulty,
            enemy.stats.defense,
        ),
    }
}

/// Resolve the enemy's strike against the player.
pub fn resolve_enemy_attack(enemy: &Enemy, player: &Player) -> EnemyAttack {
    EnemyAttack {
        damage: enemy_damage(enemy.stats.attack, player.stats.defense),
    }
}
