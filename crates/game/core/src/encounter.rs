//! Enemy selection by battle index.
//!
//! Every third battle is a boss. The tier `battle_number / 3` indexes the
//! regular catalog directly and the boss catalog at `tier - 1`, so battle 3
//! meets the first boss. Indices past the end of a catalog reuse its last
//! (strongest) entry; this caps content rather than wrapping around.

use crate::config::GameConfig;
use crate::error::CatalogError;
use crate::state::{Combatant, Enemy, Rewards};

/// Template an enemy is spawned from.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnemyArchetype {
    pub name: String,
    pub max_hp: u32,
    pub attack: u32,
    pub defense: u32,
    pub rewards: Rewards,
}

impl EnemyArchetype {
    pub fn new(
        name: impl Into<String>,
        max_hp: u32,
        attack: u32,
        defense: u32,
        rewards: Rewards,
    ) -> Self {
        Self {
            name: name.into(),
            max_hp,
            attack,
            defense,
            rewards,
        }
    }

    /// Spawns a fresh enemy at full health.
    pub fn spawn(&self, is_boss: bool) -> Enemy {
        Enemy {
            stats: Combatant::new(self.name.clone(), self.max_hp, self.attack, self.defense),
            rewards: self.rewards,
            is_boss,
        }
    }
}

/// Serialized form of an [`EncounterTable`], validated on conversion.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EncounterCatalog {
    pub regular: Vec<EnemyArchetype>,
    pub bosses: Vec<EnemyArchetype>,
}

/// Ordered regular and boss archetypes, weakest first.
///
/// Both lists are guaranteed non-empty.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(try_from = "EncounterCatalog", into = "EncounterCatalog")
)]
pub struct EncounterTable {
    regular: Vec<EnemyArchetype>,
    bosses: Vec<EnemyArchetype>,
}

impl EncounterTable {
    pub fn new(
        regular: Vec<EnemyArchetype>,
        bosses: Vec<EnemyArchetype>,
    ) -> Result<Self, CatalogError> {
        if regular.is_empty() {
            return Err(CatalogError::Empty { catalog: "regular enemy" });
        }
        if bosses.is_empty() {
            return Err(CatalogError::Empty { catalog: "boss" });
        }
        if let Some(bad) = regular.iter().chain(&bosses).find(|a| a.max_hp == 0) {
            return Err(CatalogError::ZeroHp {
                name: bad.name.clone(),
            });
        }
        Ok(Self { regular, bosses })
    }

    /// The four regular and four boss archetypes of the stock game.
    pub fn builtin() -> Self {
        Self {
            regular: vec![
                EnemyArchetype::new("Goblin", 40, 12, 3, Rewards::new(25, 20)),
                EnemyArchetype::new("Orc", 60, 16, 5, Rewards::new(40, 35)),
                EnemyArchetype::new("Troll", 90, 20, 8, Rewards::new(60, 50)),
                EnemyArchetype::new("Dragon", 120, 25, 12, Rewards::new(100, 80)),
            ],
            bosses: vec![
                EnemyArchetype::new("Goblin King", 80, 18, 6, Rewards::new(75, 100)),
                EnemyArchetype::new("Orc Chieftain", 120, 24, 10, Rewards::new(120, 150)),
                EnemyArchetype::new("Ancient Troll", 180, 30, 15, Rewards::new(180, 200)),
                EnemyArchetype::new("Elder Dragon", 250, 35, 20, Rewards::new(300, 300)),
            ],
        }
    }

    pub fn regular(&self) -> &[EnemyArchetype] {
        &self.regular
    }

    pub fn bosses(&self) -> &[EnemyArchetype] {
        &self.bosses
    }

    pub fn is_boss_battle(battle_number: u32) -> bool {
        battle_number % GameConfig::BOSS_INTERVAL == 0
    }

    pub fn tier(battle_number: u32) -> u32 {
        battle_number / GameConfig::BOSS_INTERVAL
    }

    /// Archetype for a battle, with the boss flag.
    pub fn archetype(&self, battle_number: u32) -> (&EnemyArchetype, bool) {
        let tier = Self::tier(battle_number) as usize;
        if Self::is_boss_battle(battle_number) {
            let index = tier.saturating_sub(1).min(self.bosses.len() - 1);
            (&self.bosses[index], true)
        } else {
            let index = tier.min(self.regular.len() - 1);
            (&self.regular[index], false)
        }
    }

    /// Spawns the enemy for the given battle at full health.
    pub fn next_encounter(&self, battle_number: u32) -> Enemy {
        let (archetype, is_boss) = self.archetype(battle_number);
        archetype.spawn(is_boss)
    }
}

impl Default for EncounterTable {
    fn default() -> Self {
        Self::builtin()
    }
}

impl TryFrom<EncounterCatalog> for EncounterTable {
    type Error = CatalogError;

    fn try_from(catalog: EncounterCatalog) -> Result<Self, Self::Error> {
        Self::new(catalog.regular, catalog.bosses)
    }
}

impl From<EncounterTable> for EncounterCatalog {
    fn from(table: EncounterTable) -> Self {
        Self {
            regular: table.regular,
            bosses: table.bosses,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_battles_are_regular_goblins() {
        let table = EncounterTable::builtin();
        for battle in [1, 2] {
            let enemy = table.next_encounter(battle);
            assert!(!enemy.is_boss);
            assert_eq!(enemy.name(), "Goblin");
        }
    }

    #[test]
    fn battle_three_is_first_boss() {
        let table = EncounterTable::builtin();
        let enemy = table.next_encounter(3);

        assert!(enemy.is_boss);
        assert_eq!(EncounterTable::tier(3), 1);
        assert_eq!(enemy.name(), table.bosses()[0].name);
        assert_eq!(enemy.name(), "Goblin King");
    }

    #[test]
    fn tiers_advance_every_three_battles() {
        let table = EncounterTable::builtin();
        assert_eq!(table.next_encounter(4).name(), "Orc");
        assert_eq!(table.next_encounter(5).name(), "Orc");
        assert_eq!(table.next_encounter(6).name(), "Orc Chieftain");
        assert_eq!(table.next_encounter(7).name(), "Troll");
        assert_eq!(table.next_encounter(9).name(), "Ancient Troll");
        assert_eq!(table.next_encounter(10).name(), "Dragon");
    }

    #[test]
    fn indices_clamp_to_strongest_archetype() {
        let table = EncounterTable::builtin();
        assert_eq!(table.next_encounter(40).name(), "Dragon");
        assert_eq!(table.next_encounter(300).name(), "Elder Dragon");
    }

    #[test]
    fn spawned_enemies_are_at_full_health() {
        let table = EncounterTable::builtin();
        for battle in 1..=20 {
            let enemy = table.next_encounter(battle);
            assert_eq!(enemy.stats.hp, enemy.stats.max_hp);
            assert_eq!(enemy.is_boss, battle % 3 == 0);
        }
    }

    #[test]
    fn empty_catalogs_are_rejected() {
        let goblin = EnemyArchetype::new("Goblin", 40, 12, 3, Rewards::new(25, 20));
        assert_eq!(
            EncounterTable::new(vec![], vec![goblin.clone()]),
            Err(CatalogError::Empty {
                catalog: "regular enemy"
            })
        );
        assert!(EncounterTable::new(vec![goblin], vec![]).is_err());
    }

    #[test]
    fn zero_hp_archetype_is_rejected() {
        let ghost = EnemyArchetype::new("Ghost", 0, 1, 1, Rewards::default());
        let goblin = EnemyArchetype::new("Goblin", 40, 12, 3, Rewards::new(25, 20));
        assert_eq!(
            EncounterTable::new(vec![goblin], vec![ghost]),
            Err(CatalogError::ZeroHp {
                name: "Ghost".to_string()
            })
        );
    }
}
