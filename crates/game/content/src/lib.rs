//! Data-driven content definitions and loaders.
//!
//! This crate provides loaders for the RON/TOML data files that tune a session:
//! - Game configuration (data-driven via TOML)
//! - Enemy encounter catalog (data-driven via RON)
//! - Shop item catalog (data-driven via RON)
//!
//! The stock files under `data/` mirror the built-in catalogs of `game-core`.
//! Content is read once at startup and never appears in save files.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{CatalogLoader, ConfigLoader, ContentBundle, ContentFactory, LoadResult};

/// Directory holding the stock content files shipped with this crate.
pub fn bundled_data_dir() -> std::path::PathBuf {
    std::path::PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/data"))
}
