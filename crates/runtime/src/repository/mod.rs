//! Repository layer for session progress.
//!
//! Repositories handle data that CHANGES during play (the save record of a
//! slot). Static content (enemies, items, tuning) is loaded by `game-content`.

mod error;
mod file;
mod memory;
mod record;
mod traits;

pub use error::{RepositoryError, Result};
pub use file::FileSaveRepository;
pub use memory::InMemorySaveRepository;
pub use record::{SaveRecord, checksum};
pub use traits::{SaveRepository, validate_slot};
