//! Item catalog and purchase resolution.
//!
//! Purchases are atomic: either the full cost is paid and every effect is
//! applied, or the player is returned untouched. When the shop is offered is
//! a state-machine policy ([`crate::config::ShopPolicy`]), not a shop concern.

use std::collections::HashSet;

use crate::error::{CatalogError, ErrorSeverity, GameError};
use crate::state::Player;

/// Item category.
#[derive(
    Clone,
    Copy,
    Debug,
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
pub enum ItemKind {
    Potion,
    Weapon,
    Armor,
}

/// Stat changes applied by an item.
///
/// `hp` heals (capped at max HP); `attack` and `defense` are permanent,
/// uncapped increases.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ItemEffect {
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub hp: Option<u32>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub attack: Option<u32>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub defense: Option<u32>,
}

impl ItemEffect {
    pub const fn heal(hp: u32) -> Self {
        Self {
            hp: Some(hp),
            attack: None,
            defense: None,
        }
    }

    pub const fn attack(attack: u32) -> Self {
        Self {
            hp: None,
            attack: Some(attack),
            defense: None,
        }
    }

    pub const fn defense(defense: u32) -> Self {
        Self {
            hp: None,
            attack: None,
            defense: Some(defense),
        }
    }

    /// Applies this effect to the player in place.
    pub fn apply_to(&self, player: &mut Player) {
        if let Some(hp) = self.hp {
            player.stats.heal(hp);
        }
        if let Some(attack) = self.attack {
            player.stats.attack = player.stats.attack.saturating_add(attack);
        }
        if let Some(defense) = self.defense {
            player.stats.defense = player.stats.defense.saturating_add(defense);
        }
    }
}

/// A purchasable item.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShopItem {
    pub id: String,
    pub name: String,
    pub kind: ItemKind,
    pub cost: u32,
    pub effect: ItemEffect,
    pub description: String,
}

impl ShopItem {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        kind: ItemKind,
        cost: u32,
        effect: ItemEffect,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            cost,
            effect,
            description: description.into(),
        }
    }
}

/// Reasons a purchase is refused.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PurchaseError {
    #[error("not enough gold: item costs {cost}, player has {gold}")]
    InsufficientFunds { cost: u32, gold: u32 },

    #[error("no shop item with id '{id}'")]
    UnknownItem { id: String },
}

impl GameError for PurchaseError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::InsufficientFunds { .. } => ErrorSeverity::Recoverable,
            Self::UnknownItem { .. } => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::InsufficientFunds { .. } => "INSUFFICIENT_FUNDS",
            Self::UnknownItem { .. } => "UNKNOWN_ITEM",
        }
    }
}

/// Buys an item, returning the updated player.
///
/// Fails with [`PurchaseError::InsufficientFunds`] when `gold < cost`, in which
/// case the caller's player is unchanged.
pub fn purchase(player: &Player, item: &ShopItem) -> Result<Player, PurchaseError> {
    if player.gold < item.cost {
        return Err(PurchaseError::InsufficientFunds {
            cost: item.cost,
            gold: player.gold,
        });
    }

    let mut updated = player.clone();
    updated.gold -= item.cost;
    item.effect.apply_to(&mut updated);
    Ok(updated)
}

/// Static, read-only list of items for sale.
///
/// Item ids are unique and every cost is at least 1.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "Vec<ShopItem>", into = "Vec<ShopItem>"))]
pub struct ShopCatalog {
    items: Vec<ShopItem>,
}

impl ShopCatalog {
    pub fn new(items: Vec<ShopItem>) -> Result<Self, CatalogError> {
        if items.is_empty() {
            return Err(CatalogError::Empty { catalog: "shop" });
        }
        let mut seen = HashSet::new();
        for item in &items {
            if item.cost == 0 {
                return Err(CatalogError::ZeroCost {
                    id: item.id.clone(),
                });
            }
            if !seen.insert(item.id.as_str()) {
                return Err(CatalogError::DuplicateItem {
                    id: item.id.clone(),
                });
            }
        }
        Ok(Self { items })
    }

    /// Potions, weapons and armor of the stock game.
    pub fn builtin() -> Self {
        Self {
            items: vec![
                ShopItem::new(
                    "health_potion",
                    "Health Potion",
                    ItemKind::Potion,
                    20,
                    ItemEffect::heal(30),
                    "Restores 30 HP",
                ),
                ShopItem::new(
                    "super_potion",
                    "Super Potion",
                    ItemKind::Potion,
                    50,
                    ItemEffect::heal(75),
                    "Restores 75 HP",
                ),
                ShopItem::new(
                    "iron_sword",
                    "Iron Sword",
                    ItemKind::Weapon,
                    100,
                    ItemEffect::attack(10),
                    "Increases attack by 10",
                ),
                ShopItem::new(
                    "steel_armor",
                    "Steel Armor",
                    ItemKind::Armor,
                    120,
                    ItemEffect::defense(8),
                    "Increases defense by 8",
                ),
                ShopItem::new(
                    "legendary_sword",
                    "Legendary Sword",
                    ItemKind::Weapon,
                    300,
                    ItemEffect::attack(25),
                    "Increases attack by 25",
                ),
            ],
        }
    }

    pub fn items(&self) -> &[ShopItem] {
        &self.items
    }

    pub fn find(&self, id: &str) -> Option<&ShopItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Looks up an item by id and buys it.
    pub fn purchase(&self, player: &Player, id: &str) -> Result<(Player, &ShopItem), PurchaseError> {
        let item = self
            .find(id)
            .ok_or_else(|| PurchaseError::UnknownItem { id: id.to_string() })?;
        let updated = purchase(player, item)?;
        Ok((updated, item))
    }
}

impl Default for ShopCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl TryFrom<Vec<ShopItem>> for ShopCatalog {
    type Error = CatalogError;

    fn try_from(items: Vec<ShopItem>) -> Result<Self, Self::Error> {
        Self::new(items)
    }
}

impl From<ShopCatalog> for Vec<ShopItem> {
    fn from(catalog: ShopCatalog) -> Self {
        catalog.items
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player_with_gold(gold: u32) -> Player {
        Player {
            gold,
            ..Player::default()
        }
    }

    #[test]
    fn insufficient_funds_changes_nothing() {
        let catalog = ShopCatalog::builtin();
        let player = player_with_gold(15);

        let result = catalog.purchase(&player, "health_potion");

        assert_eq!(
            result.map(|(p, _)| p),
            Err(PurchaseError::InsufficientFunds { cost: 20, gold: 15 })
        );
        assert_eq!(player.gold, 15);
    }

    #[test]
    fn potion_heal_is_capped() {
        let catalog = ShopCatalog::builtin();
        let mut player = player_with_gold(100);
        player.stats.hp = 90;

        let (updated, item) = catalog.purchase(&player, "super_potion").unwrap();

        assert_eq!(item.name, "Super Potion");
        assert_eq!(updated.gold, 50);
        assert_eq!(updated.stats.hp, updated.stats.max_hp);
    }

    #[test]
    fn equipment_bonuses_are_permanent_and_uncapped() {
        let catalog = ShopCatalog::builtin();
        let player = player_with_gold(1_000);

        let (player, _) = catalog.purchase(&player, "legendary_sword").unwrap();
        let (player, _) = catalog.purchase(&player, "legendary_sword").unwrap();
        let (player, _) = catalog.purchase(&player, "steel_armor").unwrap();

        assert_eq!(player.stats.attack, 15 + 50);
        assert_eq!(player.stats.defense, 8 + 8);
        assert_eq!(player.gold, 1_000 - 600 - 120);
    }

    #[test]
    fn exact_gold_is_enough() {
        let player = player_with_gold(20);
        let (updated, _) = ShopCatalog::builtin()
            .purchase(&player, "health_potion")
            .unwrap();
        assert_eq!(updated.gold, 0);
    }

    #[test]
    fn unknown_item_is_reported() {
        let err = ShopCatalog::builtin()
            .purchase(&Player::default(), "excalibur")
            .unwrap_err();
        assert_eq!(err.error_code(), "UNKNOWN_ITEM");
        assert_eq!(err.severity(), ErrorSeverity::Validation);
    }

    #[test]
    fn catalog_validation() {
        let potion = ShopItem::new(
            "p",
            "Potion",
            ItemKind::Potion,
            10,
            ItemEffect::heal(5),
            "",
        );
        let free = ShopItem {
            cost: 0,
            id: "free".to_string(),
            ..potion.clone()
        };

        assert!(ShopCatalog::new(vec![]).is_err());
        assert_eq!(
            ShopCatalog::new(vec![free]),
            Err(CatalogError::ZeroCost {
                id: "free".to_string()
            })
        );
        assert_eq!(
            ShopCatalog::new(vec![potion.clone(), potion]),
            Err(CatalogError::DuplicateItem { id: "p".to_string() })
        );
    }
}
