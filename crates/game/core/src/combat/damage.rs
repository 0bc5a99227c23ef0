//! Damage calculation and application.

use crate::config::GameConfig;

/// Damage of a correctly answered player attack.
///
/// # Formula
///
/// ```text
/// damage = max(1, attack + difficulty × 5 - defense)
/// ```
pub fn player_damage(attack: u32, difficulty: u8, defense: u32) -> u32 {
    let bonus = difficulty as u32 * GameConfig::DIFFICULTY_DAMAGE_BONUS;
    attack
        .saturating_add(bonus)
        .saturating_sub(defense)
        .max(GameConfig::MIN_DAMAGE)
}

/// Damage of an enemy strike.
///
/// # Formula
///
/// ```text
/// damage = max(1, attack - defense)
/// ```
///
/// The floor means defense stacking can never make the player immune.
pub fn enemy_damage(attack: u32, defense: u32) -> u32 {
    attack.saturating_sub(defense).max(GameConfig::MIN_DAMAGE)
}

/// Apply damage to current HP.
///
/// # Returns
///
/// New HP value (clamped to 0)
pub fn apply_damage(current_hp: u32, damage: u32) -> u32 {
    current_hp.saturating_sub(damage)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn player_damage_adds_difficulty_bonus() {
        assert_eq!(player_damage(15, 1, 3), 17);
        assert_eq!(player_damage(15, 4, 3), 32);
    }

    #[test]
    fn player_damage_floors_at_one() {
        assert_eq!(player_damage(1, 1, 500), 1);
    }

    #[test]
    fn enemy_damage_never_zero() {
        for defense in [0, 11, 12, 13, 1_000, u32::MAX] {
            assert!(enemy_damage(12, defense) >= 1);
        }
        assert_eq!(enemy_damage(12, 8), 4);
    }

    #[test]
    fn apply_damage_saturates() {
        assert_eq!(apply_damage(5, 7), 0);
        assert_eq!(apply_damage(50, 7), 43);
    }
}
