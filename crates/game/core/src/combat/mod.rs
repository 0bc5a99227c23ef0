//! Combat resolution system.
//!
//! This module provides pure functions for resolving combat exchanges.
//! Resolvers never mutate their inputs; the engine applies the returned
//! damage with [`apply_damage`].
//!
//! # Core Functions
//!
//! - `resolve_player_attack`: answer check + damage against the enemy
//! - `resolve_enemy_attack`: enemy strike against the player
//! - `apply_damage`: HP reduction (clamped to 0)

pub mod damage;
pub mod result;

pub use damage::{apply_damage, enemy_damage, player_damage};
pub use result::{EnemyAttack, PlayerAttack, resolve_enemy_attack, resolve_player_attack};
