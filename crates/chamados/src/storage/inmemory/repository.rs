//! In-memory repository implementation.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use chamados_core::storage::{
    PriorityRepository, RepositoryError, Result, TicketFilter, TicketRepository,
};
use chamados_core::ticket::{NewTicket, Priority, Ticket, TicketChanges};

#[derive(Debug)]
struct Tables {
    tickets: BTreeMap<i64, Ticket>,
    priorities: BTreeMap<i64, Priority>,
    next_ticket_id: i64,
}

/// In-memory storage backend.
///
/// All tables live under one lock so that id allocation and insertion happen
/// atomically. Ticket ids start at 1 and are never reused.
#[derive(Debug, Clone)]
pub struct InMemoryRepository {
    tables: Arc<RwLock<Tables>>,
}

impl Default for InMemoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryRepository {
    /// Creates a new empty in-memory repository.
    pub fn new() -> Self {
        Self {
            tables: Arc::new(RwLock::new(Tables {
                tickets: BTreeMap::new(),
                priorities: BTreeMap::new(),
                next_ticket_id: 1,
            })),
        }
    }
}

#[async_trait]
impl TicketRepository for InMemoryRepository {
    async fn list_tickets(&self, filter: &TicketFilter) -> Result<Vec<Ticket>> {
        let tables = self.tables.read().await;
        Ok(tables
            .tickets
            .values()
            .filter(|t| filter.matches(t))
            .cloned()
            .collect())
    }

    async fn get_ticket(&self, id: i64) -> Result<Option<Ticket>> {
        let tables = self.tables.read().await;
        Ok(tables.tickets.get(&id).cloned())
    }

    async fn create_ticket(&self, ticket: &NewTicket) -> Result<Ticket> {
        let mut tables = self.tables.write().await;
        let id = tables.next_ticket_id;
        tables.next_ticket_id += 1;

        let ticket = ticket.clone().into_ticket(id);
        tables.tickets.insert(id, ticket.clone());
        Ok(ticket)
    }

    async fn update_ticket(&self, id: i64, changes: &TicketChanges) -> Result<Ticket> {
        let mut tables = self.tables.write().await;
        let stored = tables
            .tickets
            .get_mut(&id)
            .ok_or_else(|| RepositoryError::not_found("Ticket", id))?;

        stored.apply_changes(changes.clone());
        Ok(stored.clone())
    }

    async fn finalize_ticket(&self, id: i64) -> Result<Ticket> {
        let mut tables = self.tables.write().await;
        let stored = tables
            .tickets
            .get_mut(&id)
            .ok_or_else(|| RepositoryError::not_found("Ticket", id))?;

        stored.finalize();
        Ok(stored.clone())
    }

    async fn delete_ticket(&self, id: i64) -> Result<()> {
        let mut tables = self.tables.write().await;
        if tables.tickets.remove(&id).is_none() {
            return Err(RepositoryError::not_found("Ticket", id));
        }
        Ok(())
    }
}

#[async_trait]
impl PriorityRepository for InMemoryRepository {
    async fn list_priorities(&self) -> Result<Vec<Priority>> {
        let tables = self.tables.read().await;
        Ok(tables.priorities.values().cloned().collect())
    }

    async fn get_priority(&self, id: i64) -> Result<Option<Priority>> {
        let tables = self.tables.read().await;
        Ok(tables.priorities.get(&id).cloned())
    }

    async fn create_priority(&self, priority: &Priority) -> Result<()> {
        let mut tables = self.tables.write().await;
        if tables.priorities.contains_key(&priority.id) {
            return Err(RepositoryError::already_exists("Priority", priority.id));
        }
        tables.priorities.insert(priority.id, priority.clone());
        Ok(())
    }
}
