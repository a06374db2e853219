//! Application state with repository-based storage.
//!
//! This module defines the shared application state that is passed to all
//! request handlers. Storage is reached only through repository trait
//! objects; the concrete backend is picked by the `sqlite` feature.

use std::sync::Arc;

use chamados_core::storage::{PriorityRepository, TicketRepository};

use crate::config::Config;
use crate::seed::{seed_demo_tickets, seed_priorities};
use crate::storage::InMemoryRepository;

/// Shared application state.
///
/// This is cloned for each request handler. Both repositories usually point
/// at the same backend instance.
#[derive(Clone)]
pub struct AppState {
    pub ticket_repo: Arc<dyn TicketRepository>,
    pub priority_repo: Arc<dyn PriorityRepository>,
}

impl AppState {
    /// Builds state from a single backend implementing both repositories.
    pub fn from_repository<R>(repo: Arc<R>) -> Self
    where
        R: TicketRepository + PriorityRepository + 'static,
    {
        Self {
            ticket_repo: repo.clone(),
            priority_repo: repo,
        }
    }

    /// Creates state backed by a fresh in-memory store.
    pub fn in_memory() -> Self {
        Self::from_repository(Arc::new(InMemoryRepository::new()))
    }

    /// Seeds the default priorities and, if asked, the demo tickets.
    pub async fn seed(&self, demo_data: bool) -> Result<(), anyhow::Error> {
        seed_priorities(self.priority_repo.as_ref()).await?;

        if demo_data {
            seed_demo_tickets(self.ticket_repo.as_ref()).await?;
        }

        Ok(())
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::in_memory()
    }
}

#[cfg(feature = "sqlite")]
mod sqlite_backend {
    use super::*;
    use crate::storage::SqliteRepository;

    impl AppState {
        /// Creates AppState with SQLite storage.
        pub async fn new(config: &Config) -> Result<Self, anyhow::Error> {
            let repo = if config.sqlite_path == ":memory:" {
                tracing::info!("Opening in-memory SQLite database");
                SqliteRepository::new_in_memory().await?
            } else {
                tracing::info!(path = %config.sqlite_path, "Opening SQLite database");
                SqliteRepository::new(&config.sqlite_path).await?
            };
            let repo = Arc::new(repo);
            Ok(Self::from_repository(repo))
        }
    }
}

#[cfg(not(feature = "sqlite"))]
mod inmemory_backend {
    use super::*;

    impl AppState {
        /// Creates AppState with in-memory storage. Data is lost on restart.
        pub async fn new(_config: &Config) -> Result<Self, anyhow::Error> {
            tracing::warn!("Built without the sqlite feature, using in-memory storage");
            Ok(Self::in_memory())
        }
    }
}
