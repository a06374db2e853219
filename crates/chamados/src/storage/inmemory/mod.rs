//! In-memory storage backend.
//!
//! Stores tickets and priorities in ordered maps behind a single
//! `Arc<RwLock<_>>`. Used by tests and by builds without the `sqlite`
//! feature. Data is lost when the repository is dropped.

mod repository;

pub use repository::InMemoryRepository;
