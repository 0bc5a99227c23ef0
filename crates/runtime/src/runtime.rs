//! High-level runtime orchestrator.
//!
//! The runtime owns the session worker, wires up request/event channels, and
//! exposes a builder-based API for hosts to drive a battle session.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use game_content::ContentFactory;
use game_core::{BattleEngine, Catalogs, GameConfig, PcgRng};

use crate::api::{CompletionCallback, CompletionReport, Result, RuntimeError, RuntimeHandle};
use crate::config::RuntimeConfig;
use crate::events::{BusPresenter, EventBus};
use crate::repository::{FileSaveRepository, SaveRepository, validate_slot};
use crate::workers::{SessionWorker, TokioScheduler};

/// Main runtime that hosts one battle session
///
/// Design: Runtime owns the worker task. [`RuntimeHandle`] provides a
/// cloneable façade for clients.
pub struct Runtime {
    handle: RuntimeHandle,
    game_seed: u64,
    worker_handle: JoinHandle<()>,
}

impl Runtime {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Get a cloneable handle to this runtime
    ///
    /// The handle can be shared across clients and async tasks.
    pub fn handle(&self) -> RuntimeHandle {
        self.handle.clone()
    }

    /// Seed the session's randomness was derived from.
    pub fn game_seed(&self) -> u64 {
        self.game_seed
    }

    /// Stop the worker and wait for it. Pending phase timers are aborted.
    pub async fn shutdown(self) -> Result<()> {
        if self.handle.shutdown().await.is_err() {
            tracing::debug!(target: "runtime", "session worker already stopped");
        }
        drop(self.handle);

        self.worker_handle.await.map_err(RuntimeError::WorkerJoin)
    }
}

/// Builder for [`Runtime`] with flexible configuration.
///
/// Content resolution order: explicit [`Self::game_config`] / [`Self::catalogs`],
/// then `content_dir` from [`RuntimeConfig`], then the built-in defaults.
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    game_config: Option<GameConfig>,
    catalogs: Option<Catalogs>,
    repository: Option<Arc<dyn SaveRepository>>,
    on_complete: Option<CompletionCallback>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            game_config: None,
            catalogs: None,
            repository: None,
            on_complete: None,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Provide the game rules directly
    pub fn game_config(mut self, game_config: GameConfig) -> Self {
        self.game_config = Some(game_config);
        self
    }

    /// Provide the enemy and shop catalogs directly
    pub fn catalogs(mut self, catalogs: Catalogs) -> Self {
        self.catalogs = Some(catalogs);
        self
    }

    /// Use a specific save repository. Implies persistence.
    pub fn repository(mut self, repository: Arc<dyn SaveRepository>) -> Self {
        self.repository = Some(repository);
        self
    }

    /// Called once when the session is won or lost.
    pub fn on_complete(mut self, callback: impl FnOnce(CompletionReport) + Send + 'static) -> Self {
        self.on_complete = Some(Box::new(callback));
        self
    }

    /// Spawns the session worker. Must be called inside a tokio runtime.
    pub async fn build(self) -> Result<Runtime> {
        let Self {
            config,
            game_config,
            catalogs,
            repository,
            on_complete,
        } = self;

        let (mut game_config, catalogs) = resolve_content(&config, game_config, catalogs)?;
        if let Some(name) = &config.player_name {
            game_config = game_config.with_player_name(name.clone());
        }

        let repository = match repository {
            Some(repository) => Some(repository),
            None if config.enable_persistence => {
                let dir = config.save_dir().ok_or(RuntimeError::MissingSaveDir)?;
                tracing::info!(target: "runtime", dir = %dir.display(), "file persistence enabled");
                Some(Arc::new(FileSaveRepository::new(dir)?) as Arc<dyn SaveRepository>)
            }
            None => None,
        };
        let slot = config.slot().to_string();
        if repository.is_some() {
            validate_slot(&slot)?;
        }

        let game_seed = config.game_seed.unwrap_or_else(rand::random);
        tracing::info!(
            target: "runtime",
            game_seed,
            max_battles = game_config.max_battles,
            pace_scale = config.pace_scale,
            "building runtime"
        );

        let event_bus = EventBus::with_capacity(config.event_bus_capacity);
        let (wake_tx, wake_rx) = mpsc::unbounded_channel();
        let (request_tx, request_rx) = mpsc::channel(config.command_buffer_size.max(1));

        let engine = BattleEngine::new(
            game_config,
            catalogs,
            game_seed,
            PcgRng,
            BusPresenter::new(event_bus.clone()),
            TokioScheduler::new(wake_tx, config.pace_scale),
        );

        let worker = SessionWorker::new(
            engine,
            request_rx,
            wake_rx,
            event_bus.clone(),
            repository,
            slot,
            on_complete,
        );
        let worker_handle = tokio::spawn(worker.run());

        Ok(Runtime {
            handle: RuntimeHandle::new(request_tx, event_bus),
            game_seed,
            worker_handle,
        })
    }
}

fn resolve_content(
    config: &RuntimeConfig,
    game_config: Option<GameConfig>,
    catalogs: Option<Catalogs>,
) -> Result<(GameConfig, Catalogs)> {
    if let (Some(game_config), Some(catalogs)) = (&game_config, &catalogs) {
        return Ok((game_config.clone(), catalogs.clone()));
    }

    let Some(dir) = &config.content_dir else {
        return Ok((game_config.unwrap_or_default(), catalogs.unwrap_or_default()));
    };

    let bundle = ContentFactory::new(dir)
        .load()
        .map_err(|error| RuntimeError::Content(format!("{error:#}")))?;
    tracing::info!(target: "runtime", dir = %dir.display(), "loaded game content");

    Ok((
        game_config.unwrap_or(bundle.config),
        catalogs.unwrap_or(bundle.catalogs),
    ))
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn explicit_content_wins_over_directory() {
        let config = RuntimeConfig {
            content_dir: Some(PathBuf::from("/nonexistent/content")),
            ..RuntimeConfig::default()
        };
        let rules = GameConfig::new().with_max_battles(2);

        let (game_config, catalogs) =
            resolve_content(&config, Some(rules.clone()), Some(Catalogs::default())).unwrap();

        assert_eq!(game_config, rules);
        assert_eq!(catalogs, Catalogs::default());
    }

    #[test]
    fn defaults_without_content_dir() {
        let (game_config, catalogs) =
            resolve_content(&RuntimeConfig::default(), None, None).unwrap();

        assert_eq!(game_config, GameConfig::default());
        assert_eq!(catalogs, Catalogs::default());
    }

    #[test]
    fn content_dir_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("config.toml"), "max_battles = 3\n").unwrap();
        let config = RuntimeConfig {
            content_dir: Some(dir.path().to_path_buf()),
            ..RuntimeConfig::default()
        };

        let (game_config, _) = resolve_content(&config, None, None).unwrap();

        assert_eq!(game_config.max_battles, 3);
    }

    #[tokio::test]
    async fn persistence_requires_valid_slot() {
        let config = RuntimeConfig {
            session_id: Some("../escape".to_string()),
            ..RuntimeConfig::default()
        };

        let result = Runtime::builder()
            .config(config)
            .repository(Arc::new(crate::repository::InMemorySaveRepository::new()))
            .build()
            .await;

        assert!(matches!(
            result,
            Err(RuntimeError::Repository(crate::RepositoryError::InvalidSlot(_)))
        ));
    }
}
