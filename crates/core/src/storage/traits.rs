use async_trait::async_trait;

use crate::ticket::{NewTicket, Priority, Ticket, TicketChanges};

use super::{Result, TicketFilter};

/// Repository for ticket operations.
#[async_trait]
pub trait TicketRepository: Send + Sync {
    /// Lists tickets matching the filter, in ascending id order.
    async fn list_tickets(&self, filter: &TicketFilter) -> Result<Vec<Ticket>>;

    /// Gets a ticket by its ID.
    async fn get_ticket(&self, id: i64) -> Result<Option<Ticket>>;

    /// Persists a new ticket and returns it with its assigned ID.
    async fn create_ticket(&self, ticket: &NewTicket) -> Result<Ticket>;

    /// Overwrites title and description of a stored ticket and returns the
    /// result. Every other column keeps its stored value, even if it changed
    /// after the caller last read the ticket.
    ///
    /// Fails with `NotFound` if the ID is unknown.
    async fn update_ticket(&self, id: i64, changes: &TicketChanges) -> Result<Ticket>;

    /// Sets the status of a stored ticket to finished and returns the result.
    /// Only the status column is written.
    ///
    /// Fails with `NotFound` if the ID is unknown.
    async fn finalize_ticket(&self, id: i64) -> Result<Ticket>;

    /// Deletes a ticket by its ID. Fails with `NotFound` if the ID is unknown.
    async fn delete_ticket(&self, id: i64) -> Result<()>;
}

/// Repository for priority lookups.
#[async_trait]
pub trait PriorityRepository: Send + Sync {
    /// Lists all priorities, in ascending id order.
    async fn list_priorities(&self) -> Result<Vec<Priority>>;

    /// Gets a priority by its ID.
    async fn get_priority(&self, id: i64) -> Result<Option<Priority>>;

    /// Inserts a priority with a caller-chosen ID.
    async fn create_priority(&self, priority: &Priority) -> Result<()>;
}
