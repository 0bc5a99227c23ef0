//! Content factory for building a session's configuration and catalogs.

use std::path::{Path, PathBuf};

use game_core::{Catalogs, EncounterTable, GameConfig, ShopCatalog};

use crate::loaders::{CatalogLoader, ConfigLoader, LoadResult};

/// Everything a battle engine needs besides its seams.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContentBundle {
    pub config: GameConfig,
    pub catalogs: Catalogs,
}

/// Content factory that loads all game content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── encounters.ron
/// └── shop.ron
/// ```
///
/// Every file is optional. A missing file falls back to the built-in
/// content; a file that exists but fails to parse or validate is an error.
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub const CONFIG_FILE: &'static str = "config.toml";
    pub const ENCOUNTERS_FILE: &'static str = "encounters.ron";
    pub const SHOP_FILE: &'static str = "shop.ron";

    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Factory over the stock files shipped with this crate.
    pub fn bundled() -> Self {
        Self::new(crate::bundled_data_dir())
    }

    /// Load game configuration from `config.toml`.
    pub fn load_config(&self) -> LoadResult<GameConfig> {
        self.load_or(Self::CONFIG_FILE, ConfigLoader::load, GameConfig::default)
    }

    /// Load the encounter table from `encounters.ron`.
    pub fn load_encounters(&self) -> LoadResult<EncounterTable> {
        self.load_or(
            Self::ENCOUNTERS_FILE,
            CatalogLoader::load_encounters,
            EncounterTable::builtin,
        )
    }

    /// Load the shop catalog from `shop.ron`.
    pub fn load_shop(&self) -> LoadResult<ShopCatalog> {
        self.load_or(Self::SHOP_FILE, CatalogLoader::load_shop, ShopCatalog::builtin)
    }

    /// Load every content file.
    pub fn load(&self) -> LoadResult<ContentBundle> {
        Ok(ContentBundle {
            config: self.load_config()?,
            catalogs: Catalogs::new(self.load_encounters()?, self.load_shop()?),
        })
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn load_or<T>(
        &self,
        file: &str,
        load: impl FnOnce(&Path) -> LoadResult<T>,
        fallback: impl FnOnce() -> T,
    ) -> LoadResult<T> {
        let path = self.data_dir.join(file);
        if path.exists() {
            load(&path)
        } else {
            Ok(fallback())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_paths() {
        let factory = ContentFactory::new("/tmp/data");
        assert_eq!(factory.data_dir(), Path::new("/tmp/data"));
    }

    #[test]
    fn bundled_files_match_builtin_content() {
        let bundle = ContentFactory::bundled().load().unwrap();

        assert_eq!(bundle.config, GameConfig::default());
        assert_eq!(bundle.catalogs.encounters, EncounterTable::builtin());
        assert_eq!(bundle.catalogs.shop, ShopCatalog::builtin());
    }

    #[test]
    fn empty_directory_falls_back_to_builtin() {
        let dir = tempfile::tempdir().unwrap();
        let bundle = ContentFactory::new(dir.path()).load().unwrap();

        assert_eq!(bundle, ContentBundle::default());
    }

    #[test]
    fn broken_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(ContentFactory::SHOP_FILE), "(items: [").unwrap();

        let err = ContentFactory::new(dir.path()).load().unwrap_err();
        assert!(err.to_string().contains("shop.ron"));
    }
}
