//! Collaborators the host injects into the battle engine.
//!
//! The engine owns no clock and no entropy source. Randomness comes from an
//! [`RngOracle`] combined with the session seed, and cosmetic delays are
//! delegated to a [`Scheduler`]. Both are supplied at construction so tests
//! can replace them with deterministic doubles.
mod rng;
mod scheduler;

pub use rng::{Dice, PcgRng, RngOracle, compute_seed};
pub use scheduler::{QueuedScheduler, Scheduler, Wake, WakePhase};
