//! Storage backend implementations.
//!
//! Concrete implementations of the repository traits defined in
//! `chamados_core::storage`.
//!
//! - `inmemory`: always compiled; used by tests and by builds without `sqlite`
//! - `sqlite` (default feature): `rusqlite` + `tokio-rusqlite`
//!
//! Build without SQLite:
//! ```bash
//! cargo build -p chamados --no-default-features
//! ```

pub mod inmemory;

#[cfg(feature = "sqlite")]
pub mod sqlite;

pub use inmemory::InMemoryRepository;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteRepository;
