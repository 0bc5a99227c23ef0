//! Authoritative battle state representation.
//!
//! This module owns the data structures that describe the combatants, the
//! session bookkeeping and the state machine's current phase. Hosts only ever
//! receive clones of these values; mutation flows exclusively through
//! [`crate::engine::BattleEngine`].
mod combatant;
mod session;

pub use combatant::{Combatant, Enemy, Player, Rewards};
pub use session::{BattleSession, BattleState, SessionStats};
