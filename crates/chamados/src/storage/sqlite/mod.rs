//! SQLite storage backend implementation.
//!
//! Uses `rusqlite` for statements and `tokio-rusqlite` to run them off the
//! async executor on a dedicated connection thread.

mod conversions;
mod error;
mod repository;
mod schema;

pub use repository::SqliteRepository;
