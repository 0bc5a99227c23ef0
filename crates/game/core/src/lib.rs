//! Deterministic battle rules and data types shared across hosts.
//!
//! `game-core` defines the canonical rules (problems, combat, encounters,
//! shop, progression) and the battle state machine, and exposes pure APIs
//! that any host can drive. All session mutation flows through
//! [`engine::BattleEngine`], and supporting crates depend on the types
//! re-exported here.
pub mod combat;
pub mod config;
pub mod encounter;
pub mod engine;
pub mod env;
pub mod error;
pub mod event;
pub mod problem;
pub mod progression;
pub mod shop;
pub mod snapshot;
pub mod state;

pub use config::{GameConfig, LevelUpGains, LevelUpHeal, PhaseDelays, PlayerTemplate, ShopPolicy};
pub use encounter::{EncounterCatalog, EncounterTable, EnemyArchetype};
pub use engine::{BattleEngine, Catalogs, CommandError};
pub use env::{Dice, PcgRng, QueuedScheduler, RngOracle, Scheduler, Wake, WakePhase, compute_seed};
pub use error::{CatalogError, ErrorContext, ErrorSeverity, GameError};
pub use event::{
    BattleEvent, ChallengeOpened, CombatResult, Command, EnemyAttacked, EnemyDefeated,
    EnemySnapshot, GameCompleted, HudUpdate, ItemPurchased, PlayerDefeated, PlayerSnapshot,
    Presenter, PurchaseRejected, ShopOpened,
};
pub use problem::{MathProblem, ProblemKind};
pub use progression::LevelUp;
pub use shop::{ItemEffect, ItemKind, PurchaseError, ShopCatalog, ShopItem};
pub use snapshot::{SaveSnapshot, SnapshotError};
pub use state::{BattleSession, BattleState, Combatant, Enemy, Player, Rewards, SessionStats};
