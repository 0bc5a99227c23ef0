//! In-memory repository implementations.

mod save;

pub use save::InMemorySaveRepository;
