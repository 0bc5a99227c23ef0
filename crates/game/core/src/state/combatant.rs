//! Player and enemy stat blocks.

use crate::config::PlayerTemplate;

/// Base shape shared by the player and every enemy.
///
/// Invariant: `hp <= max_hp` and `max_hp > 0`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Combatant {
    pub name: String,
    pub hp: u32,
    pub max_hp: u32,
    pub attack: u32,
    pub defense: u32,
}

impl Combatant {
    /// Creates a combatant at full health.
    pub fn new(name: impl Into<String>, max_hp: u32, attack: u32, defense: u32) -> Self {
        let max_hp = max_hp.max(1);
        Self {
            name: name.into(),
            hp: max_hp,
            max_hp,
            attack,
            defense,
        }
    }

    pub fn is_defeated(&self) -> bool {
        self.hp == 0
    }

    /// Applies damage, saturating at zero. Returns the remaining HP.
    pub fn take_damage(&mut self, damage: u32) -> u32 {
        self.hp = crate::combat::apply_damage(self.hp, damage);
        self.hp
    }

    /// Heals up to max HP. Returns the HP actually restored.
    pub fn heal(&mut self, amount: u32) -> u32 {
        let before = self.hp;
        self.hp = self.hp.saturating_add(amount).min(self.max_hp);
        self.hp - before
    }

    /// Current HP as a whole percentage of max HP.
    pub fn hp_percent(&self) -> u32 {
        if self.max_hp == 0 {
            return 0;
        }
        ((self.hp as u64 * 100) / self.max_hp as u64) as u32
    }
}

/// The player character. Created once per session and mutated in place.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Player {
    pub stats: Combatant,
    pub level: u32,
    pub exp: u32,
    pub exp_to_next: u32,
    pub gold: u32,
}

impl Player {
    pub fn from_template(template: &PlayerTemplate) -> Self {
        Self {
            stats: Combatant::new(
                template.name.clone(),
                template.max_hp,
                template.attack,
                template.defense,
            ),
            level: 1,
            exp: 0,
            exp_to_next: template.exp_to_next.max(1),
            gold: template.gold,
        }
    }

    pub fn name(&self) -> &str {
        &self.stats.name
    }

    pub fn is_defeated(&self) -> bool {
        self.stats.is_defeated()
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::from_template(&PlayerTemplate::default())
    }
}

/// Experience and gold granted for defeating an enemy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rewards {
    pub exp: u32,
    pub gold: u32,
}

impl Rewards {
    pub const fn new(exp: u32, gold: u32) -> Self {
        Self { exp, gold }
    }
}

/// An opponent, spawned fresh for each encounter.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Enemy {
    pub stats: Combatant,
    pub rewards: Rewards,
    pub is_boss: bool,
}

impl Enemy {
    pub fn name(&self) -> &str {
        &self.stats.name
    }

    pub fn is_defeated(&self) -> bool {
        self.stats.is_defeated()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn damage_saturates_at_zero() {
        let mut goblin = Combatant::new("Goblin", 40, 12, 3);
        assert_eq!(goblin.take_damage(15), 25);
        assert_eq!(goblin.take_damage(100), 0);
        assert!(goblin.is_defeated());
    }

    #[test]
    fn heal_is_capped_at_max() {
        let mut hero = Combatant::new("Hero", 100, 15, 8);
        hero.take_damage(10);
        assert_eq!(hero.heal(30), 10);
        assert_eq!(hero.hp, 100);
    }

    #[test]
    fn default_player_matches_starting_stats() {
        let player = Player::default();
        assert_eq!(player.name(), "Hero");
        assert_eq!(player.stats.hp, 100);
        assert_eq!(player.stats.attack, 15);
        assert_eq!(player.stats.defense, 8);
        assert_eq!(player.level, 1);
        assert_eq!(player.exp_to_next, 100);
        assert_eq!(player.gold, 50);
    }

    #[test]
    fn hp_percent_rounds_down() {
        let mut troll = Combatant::new("Troll", 90, 20, 8);
        troll.take_damage(31);
        assert_eq!(troll.hp_percent(), 65);
    }
}
