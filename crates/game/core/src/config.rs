//! Game configuration constants and tunable parameters.

/// How much HP a level-up restores.
///
/// The two historical scene variants disagree, so the choice is left to the
/// host configuration.
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
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum LevelUpHeal {
    /// Current HP grows by the max HP increase only.
    #[default]
    HealByIncrease,
    /// Current HP is restored to the new max HP.
    FullRestore,
}

/// Stat increases granted by every level-up.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LevelUpGains {
    pub hp: u32,
    pub attack: u32,
    pub defense: u32,
}

impl Default for LevelUpGains {
    fn default() -> Self {
        Self {
            hp: 20,
            attack: 3,
            defense: 2,
        }
    }
}

/// Starting stats for a fresh player.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PlayerTemplate {
    pub name: String,
    pub max_hp: u32,
    pub attack: u32,
    pub defense: u32,
    pub exp_to_next: u32,
    pub gold: u32,
}

impl Default for PlayerTemplate {
    fn default() -> Self {
        Self {
            name: GameConfig::DEFAULT_PLAYER_NAME.to_string(),
            max_hp: 100,
            attack: 15,
            defense: 8,
            exp_to_next: 100,
            gold: 50,
        }
    }
}

/// When the shop is offered after a won battle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ShopPolicy {
    /// Offer the shop after every boss.
    pub after_boss: bool,
    /// Offer the shop when `battle_number % every == 0`. Zero disables it.
    pub every: u32,
}

impl ShopPolicy {
    pub fn is_offered(&self, battle_number: u32, defeated_boss: bool) -> bool {
        (self.after_boss && defeated_boss) || (self.every > 0 && battle_number % self.every == 0)
    }
}

impl Default for ShopPolicy {
    fn default() -> Self {
        Self {
            after_boss: true,
            every: 4,
        }
    }
}

/// Cosmetic pacing between phases, in milliseconds.
///
/// Delays only pace auto-advances. A phase that needs player input never
/// advances on a timer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PhaseDelays {
    /// From battle start (or the end of an enemy attack) to the next problem.
    pub turn_start_ms: u64,
    /// How long a combat result stays on screen before the enemy strikes.
    pub answer_result_ms: u64,
    /// From the enemy attack to the next player turn.
    pub enemy_attack_ms: u64,
    /// From an enemy defeat to the shop or the next battle.
    pub victory_ms: u64,
}

impl PhaseDelays {
    /// All delays zero, for headless hosts and tests.
    pub const fn instant() -> Self {
        Self {
            turn_start_ms: 0,
            answer_result_ms: 0,
            enemy_attack_ms: 0,
            victory_ms: 0,
        }
    }
}

impl Default for PhaseDelays {
    fn default() -> Self {
        Self {
            turn_start_ms: 1_000,
            answer_result_ms: 2_000,
            enemy_attack_ms: 2_000,
            victory_ms: 3_000,
        }
    }
}

/// Game configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    /// Number of battles to win the session.
    pub max_battles: u32,
    pub starting_player: PlayerTemplate,
    pub level_up_heal: LevelUpHeal,
    pub level_up_gains: LevelUpGains,
    pub shop: ShopPolicy,
    pub delays: PhaseDelays,
}

impl GameConfig {
    // ===== balance constants =====
    /// Bonus damage per point of problem difficulty.
    pub const DIFFICULTY_DAMAGE_BONUS: u32 = 5;
    /// Minimum damage of any landed attack.
    pub const MIN_DAMAGE: u32 = 1;
    /// Every N-th battle is a boss fight.
    pub const BOSS_INTERVAL: u32 = 3;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_MAX_BATTLES: u32 = 10;
    pub const DEFAULT_PLAYER_NAME: &'static str = "Hero";

    pub fn new() -> Self {
        Self {
            max_battles: Self::DEFAULT_MAX_BATTLES,
            starting_player: PlayerTemplate::default(),
            level_up_heal: LevelUpHeal::default(),
            level_up_gains: LevelUpGains::default(),
            shop: ShopPolicy::default(),
            delays: PhaseDelays::default(),
        }
    }

    pub fn with_max_battles(mut self, max_battles: u32) -> Self {
        self.max_battles = max_battles.max(1);
        self
    }

    pub fn with_player_name(mut self, name: impl Into<String>) -> Self {
        self.starting_player.name = name.into();
        self
    }

    pub fn with_level_up_heal(mut self, policy: LevelUpHeal) -> Self {
        self.level_up_heal = policy;
        self
    }

    pub fn with_delays(mut self, delays: PhaseDelays) -> Self {
        self.delays = delays;
        self
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shop_policy_cadence() {
        let policy = ShopPolicy::default();

        assert!(policy.is_offered(3, true));
        assert!(policy.is_offered(4, false));
        assert!(policy.is_offered(8, false));
        assert!(!policy.is_offered(5, false));
        assert!(!policy.is_offered(2, false));
    }

    #[test]
    fn shop_policy_zero_interval_only_after_boss() {
        let policy = ShopPolicy {
            after_boss: true,
            every: 0,
        };

        assert!(!policy.is_offered(4, false));
        assert!(policy.is_offered(6, true));
    }

    #[test]
    fn level_up_heal_parses_case_insensitive() {
        let policy: LevelUpHeal = "Full_Restore".parse().unwrap();
        assert_eq!(policy, LevelUpHeal::FullRestore);
        assert_eq!(LevelUpHeal::HealByIncrease.as_ref(), "heal_by_increase");
    }

    #[test]
    fn max_battles_never_zero() {
        assert_eq!(GameConfig::new().with_max_battles(0).max_battles, 1);
    }
}
