//! Encounter and shop catalog loaders.

use std::path::Path;

use game_core::{EncounterCatalog, EncounterTable, ShopCatalog, ShopItem};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Shop catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShopFile {
    pub items: Vec<ShopItem>,
}

/// Loader for enemy and shop catalogs from RON files.
///
/// Both catalogs are validated on load, so an empty list, a zero-hp enemy or
/// a free item is reported here instead of surfacing mid-session.
pub struct CatalogLoader;

impl CatalogLoader {
    /// Load the encounter table from a RON file.
    ///
    /// ```ron
    /// (
    ///     regular: [(name: "Goblin", max_hp: 40, attack: 12, defense: 3, rewards: (exp: 25, gold: 20))],
    ///     bosses: [(name: "Goblin King", max_hp: 80, attack: 18, defense: 6, rewards: (exp: 75, gold: 100))],
    /// )
    /// ```
    pub fn load_encounters(path: &Path) -> LoadResult<EncounterTable> {
        let content = read_file(path)?;
        Self::parse_encounters(&content).map_err(|e| {
            anyhow::anyhow!("Failed to load encounters RON at {}: {}", path.display(), e)
        })
    }

    pub fn parse_encounters(content: &str) -> LoadResult<EncounterTable> {
        let catalog: EncounterCatalog = ron::from_str(content)?;
        Ok(EncounterTable::try_from(catalog)?)
    }

    /// Load the shop catalog from a RON file.
    pub fn load_shop(path: &Path) -> LoadResult<ShopCatalog> {
        let content = read_file(path)?;
        Self::parse_shop(&content)
            .map_err(|e| anyhow::anyhow!("Failed to load shop RON at {}: {}", path.display(), e))
    }

    pub fn parse_shop(content: &str) -> LoadResult<ShopCatalog> {
        let file: ShopFile = ron::from_str(content)?;
        Ok(ShopCatalog::new(file.items)?)
    }
}

#[cfg(test)]
mod tests {
    use game_core::{ItemEffect, ItemKind};

    use super::*;

    #[test]
    fn parses_minimal_encounters() {
        let table = CatalogLoader::parse_encounters(
            r#"(
                regular: [(name: "Slime", max_hp: 10, attack: 2, defense: 0, rewards: (exp: 5, gold: 1))],
                bosses: [(name: "King Slime", max_hp: 30, attack: 6, defense: 1, rewards: (exp: 20, gold: 10))],
            )"#,
        )
        .unwrap();

        assert_eq!(table.next_encounter(1).name(), "Slime");
        assert_eq!(table.next_encounter(3).name(), "King Slime");
        // Catalog shorter than the campaign: the last entry repeats.
        assert_eq!(table.next_encounter(9).name(), "King Slime");
    }

    #[test]
    fn empty_boss_list_is_rejected() {
        let err = CatalogLoader::parse_encounters(
            r#"(
                regular: [(name: "Slime", max_hp: 10, attack: 2, defense: 0, rewards: (exp: 5, gold: 1))],
                bosses: [],
            )"#,
        )
        .unwrap_err();

        assert!(err.to_string().contains("at least one entry"));
    }

    #[test]
    fn parses_shop_items() {
        let shop = CatalogLoader::parse_shop(
            r#"(
                items: [
                    (
                        id: "elixir",
                        name: "Elixir",
                        kind: potion,
                        cost: 10,
                        effect: (hp: Some(5)),
                        description: "Restores 5 HP",
                    ),
                ],
            )"#,
        )
        .unwrap();

        let elixir = shop.find("elixir").unwrap();
        assert_eq!(elixir.kind, ItemKind::Potion);
        assert_eq!(elixir.effect, ItemEffect::heal(5));
    }

    #[test]
    fn free_items_are_rejected() {
        let result = CatalogLoader::parse_shop(
            r#"(items: [(id: "gift", name: "Gift", kind: armor, cost: 0, effect: (defense: Some(1)), description: "")])"#,
        );
        assert!(result.is_err());
    }
}
