//! Typed contract between the battle engine and the presentation layer.
//!
//! Events flow one way, from the engine to a [`Presenter`]; commands flow the
//! other way into `BattleEngine::handle_command`. Payloads are plain records
//! copied out of the session, so a presenter can never mutate engine state.

use crate::problem::MathProblem;
use crate::progression::LevelUp;
use crate::shop::{ItemEffect, PurchaseError, ShopItem};
use crate::state::{Enemy, Player};

/// Read-only view of the player for HUD rendering.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerSnapshot {
    pub name: String,
    pub hp: u32,
    pub max_hp: u32,
    pub attack: u32,
    pub defense: u32,
    pub level: u32,
    pub exp: u32,
    pub exp_to_next: u32,
    pub gold: u32,
}

impl From<&Player> for PlayerSnapshot {
    fn from(player: &Player) -> Self {
        Self {
            name: player.stats.name.clone(),
            hp: player.stats.hp,
            max_hp: player.stats.max_hp,
            attack: player.stats.attack,
            defense: player.stats.defense,
            level: player.level,
            exp: player.exp,
            exp_to_next: player.exp_to_next,
            gold: player.gold,
        }
    }
}

/// Read-only view of the current enemy.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnemySnapshot {
    pub name: String,
    pub hp: u32,
    pub max_hp: u32,
    pub is_boss: bool,
}

impl From<&Enemy> for EnemySnapshot {
    fn from(enemy: &Enemy) -> Self {
        Self {
            name: enemy.stats.name.clone(),
            hp: enemy.stats.hp,
            max_hp: enemy.stats.max_hp,
            is_boss: enemy.is_boss,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChallengeOpened {
    pub problem: MathProblem,
    pub enemy: EnemySnapshot,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HudUpdate {
    pub player: PlayerSnapshot,
    pub enemy: Option<EnemySnapshot>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatResult {
    pub success: bool,
    pub damage: u32,
    pub message: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnemyAttacked {
    pub damage: u32,
    pub enemy_name: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnemyDefeated {
    pub name: String,
    pub exp: u32,
    pub gold: u32,
    pub is_boss: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerDefeated {
    pub final_score: u32,
    pub level: u32,
    pub battles_won: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShopOpened {
    pub items: Vec<ShopItem>,
    pub gold: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemPurchased {
    pub item_id: String,
    pub item_name: String,
    pub effect: ItemEffect,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PurchaseRejected {
    pub item_id: String,
    pub reason: PurchaseError,
    pub gold: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameCompleted {
    pub victory: bool,
    pub final_score: u32,
    pub achievements: Vec<String>,
}

/// Every notification the engine can emit.
#[derive(Clone, Debug, PartialEq, Eq, strum::IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(tag = "kind", content = "payload", rename_all = "kebab-case")
)]
#[strum(serialize_all = "kebab-case")]
pub enum BattleEvent {
    ChallengeOpened(ChallengeOpened),
    HudUpdate(HudUpdate),
    CombatResult(CombatResult),
    EnemyAttacked(EnemyAttacked),
    EnemyDefeated(EnemyDefeated),
    LevelUp(LevelUp),
    PlayerDefeated(PlayerDefeated),
    ShopOpened(ShopOpened),
    ItemPurchased(ItemPurchased),
    PurchaseRejected(PurchaseRejected),
    GameCompleted(GameCompleted),
}

impl BattleEvent {
    /// Wire name of the event, e.g. `"challenge-opened"`.
    pub fn name(&self) -> &'static str {
        self.into()
    }
}

/// Every instruction the presentation layer can send.
#[derive(Clone, Debug, PartialEq, Eq, strum::IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "kebab-case"))]
#[strum(serialize_all = "kebab-case")]
pub enum Command {
    SubmitAnswer { value: i32 },
    PurchaseItem { id: String },
    CloseShop,
}

impl Command {
    /// Wire name of the command, e.g. `"submit-answer"`.
    pub fn name(&self) -> &'static str {
        self.into()
    }
}

/// Receiver of engine notifications.
///
/// Implementations only marshal; they must not feed commands back into the
/// engine from inside `present`.
pub trait Presenter {
    fn present(&mut self, event: BattleEvent);
}

impl Presenter for Vec<BattleEvent> {
    fn present(&mut self, event: BattleEvent) {
        self.push(event);
    }
}

impl<P: Presenter + ?Sized> Presenter for &mut P {
    fn present(&mut self, event: BattleEvent) {
        (**self).present(event);
    }
}

impl<P: Presenter + ?Sized> Presenter for Box<P> {
    fn present(&mut self, event: BattleEvent) {
        (**self).present(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_names_are_kebab_case() {
        let event = BattleEvent::EnemyAttacked(EnemyAttacked {
            damage: 4,
            enemy_name: "Goblin".to_string(),
        });
        assert_eq!(event.name(), "enemy-attacked");
        assert_eq!(Command::CloseShop.name(), "close-shop");
        assert_eq!(Command::SubmitAnswer { value: 3 }.name(), "submit-answer");
    }

    #[test]
    fn snapshots_copy_visible_fields() {
        let player = Player::default();
        let snapshot = PlayerSnapshot::from(&player);
        assert_eq!(snapshot.name, "Hero");
        assert_eq!(snapshot.hp, 100);
        assert_eq!(snapshot.gold, 50);
    }
}
