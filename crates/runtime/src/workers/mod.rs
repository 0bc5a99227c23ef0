//! Worker tasks that back the runtime orchestration.
//!
//! The session worker owns the battle engine; the scheduler feeds its delayed
//! wakes back into the same task.

mod scheduler;
mod session;

pub use scheduler::TokioScheduler;
pub(crate) use session::{Request, SessionWorker};
