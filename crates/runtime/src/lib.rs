//! Runtime orchestration for the math battle engine.
//!
//! This crate wires the pure [`game_core::BattleEngine`] to tokio: a session
//! worker owns the engine, phase delays become timer tasks, engine events are
//! fanned out over a topic-based bus, and progress is autosaved through a
//! repository. Consumers embed [`Runtime`] and play through
//! [`RuntimeHandle`].
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] provides topic-based event bus for flexible event routing
//! - [`repository`] persists save records per slot
//! - [`config`] reads host settings from the environment
//! - `workers` keeps background tasks internal to the crate
pub mod api;
pub mod config;
pub mod events;
pub mod repository;
pub mod runtime;

mod workers;

pub use api::{CompletionCallback, CompletionReport, Result, RuntimeError, RuntimeHandle};
pub use config::RuntimeConfig;
pub use events::{BusPresenter, CommandRejected, Event, EventBus, PersistenceEvent, Topic};
pub use repository::{
    FileSaveRepository, InMemorySaveRepository, RepositoryError, SaveRecord, SaveRepository,
};
pub use runtime::{Runtime, RuntimeBuilder};
pub use workers::TokioScheduler;
