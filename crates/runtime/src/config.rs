//! Runtime configuration structures and loaders.
use std::env;
use std::path::PathBuf;

/// Host-level settings. Game rules live in [`game_core::GameConfig`].
#[derive(Clone, Debug)]
pub struct RuntimeConfig {
    pub session_id: Option<String>,
    pub enable_persistence: bool,
    pub save_data_dir: Option<PathBuf>,
    pub content_dir: Option<PathBuf>,
    /// Fixed seed for reproducible sessions. Random when unset.
    pub game_seed: Option<u64>,
    /// Multiplier applied to every phase delay. `0.0` makes pacing instant.
    pub pace_scale: f64,
    pub event_bus_capacity: usize,
    pub command_buffer_size: usize,
    pub player_name: Option<String>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            session_id: None,
            enable_persistence: false,
            save_data_dir: None,
            content_dir: None,
            game_seed: None,
            pace_scale: 1.0,
            event_bus_capacity: 256,
            command_buffer_size: 32,
            player_name: None,
        }
    }
}

impl RuntimeConfig {
    pub const DEFAULT_SLOT: &'static str = "default";

    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `GAME_SESSION_ID` - Save slot name (default: `default`)
    /// - `ENABLE_PERSISTENCE` - Enable autosave and restore (default: false)
    /// - `SAVE_DATA_DIR` - Directory for save files (default: platform-specific)
    /// - `CONTENT_DIR` - Directory with `config.toml`, `encounters.ron`, `shop.ron`
    /// - `GAME_SEED` - Fixed RNG seed (default: random)
    /// - `PACE_SCALE` - Delay multiplier, `0` for instant pacing (default: 1.0)
    /// - `EVENT_BUS_CAPACITY` - Broadcast buffer per topic (default: 256)
    /// - `PLAYER_NAME` - Overrides the configured hero name
    pub fn from_env() -> Self {
        let mut config = Self::default();

        config.session_id = env::var("GAME_SESSION_ID").ok().filter(|id| !id.is_empty());

        if let Some(enable) = read_env::<bool>("ENABLE_PERSISTENCE") {
            config.enable_persistence = enable;
        } else if env::var("ENABLE_PERSISTENCE").is_ok() {
            // Also accept just setting the variable without value as "true"
            config.enable_persistence = true;
        }

        config.save_data_dir = env::var("SAVE_DATA_DIR").ok().map(PathBuf::from);
        config.content_dir = env::var("CONTENT_DIR").ok().map(PathBuf::from);
        config.game_seed = read_env::<u64>("GAME_SEED");

        if let Some(scale) = read_env::<f64>("PACE_SCALE")
            && scale.is_finite()
        {
            config.pace_scale = scale.max(0.0);
        }

        if let Some(capacity) = read_env::<usize>("EVENT_BUS_CAPACITY") {
            config.event_bus_capacity = capacity.max(1);
        }

        config.player_name = env::var("PLAYER_NAME").ok().filter(|name| !name.is_empty());

        config
    }

    /// Save slot used by this session.
    pub fn slot(&self) -> &str {
        self.session_id.as_deref().unwrap_or(Self::DEFAULT_SLOT)
    }

    /// Explicit save directory, or the platform data directory.
    pub fn save_dir(&self) -> Option<PathBuf> {
        self.save_data_dir.clone().or_else(|| {
            directories::ProjectDirs::from("", "", "math-rpg")
                .map(|dirs| dirs.data_dir().join("saves"))
        })
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
