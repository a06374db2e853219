//! SQLite repository implementation.

use async_trait::async_trait;
use tokio_rusqlite::Connection;

use chamados_core::storage::{
    PriorityRepository, RepositoryError, Result, TicketFilter, TicketRepository,
};
use chamados_core::ticket::{NewTicket, Priority, Ticket, TicketChanges, STATUS_FINISHED};

use super::conversions::{format_datetime, row_to_priority, row_to_ticket};
use super::error::map_tokio_rusqlite_error;
use super::schema;

/// Helper to wrap rusqlite errors for tokio_rusqlite closures.
fn wrap_err(e: rusqlite::Error) -> tokio_rusqlite::Error {
    tokio_rusqlite::Error::Rusqlite(e)
}

/// SQLite-based repository implementation.
///
/// Every method issues a single statement on the shared connection; there is
/// no transaction spanning more than one call.
pub struct SqliteRepository {
    conn: Connection,
}

impl SqliteRepository {
    /// Opens (or creates) a database file and ensures the schema exists.
    pub async fn new(path: &str) -> Result<Self> {
        let conn = Connection::open(path)
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;

        Self::init_schema(&conn).await?;

        Ok(Self { conn })
    }

    /// Creates a repository backed by an in-memory database.
    pub async fn new_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;

        Self::init_schema(&conn).await?;

        Ok(Self { conn })
    }

    async fn init_schema(conn: &Connection) -> Result<()> {
        conn.call(|conn| {
            conn.execute_batch(schema::CREATE_TABLES)
                .map_err(wrap_err)?;
            Ok(())
        })
        .await
        .map_err(|e| RepositoryError::QueryFailed(e.to_string()))
    }
}

// ============================================================================
// TicketRepository implementation
// ============================================================================

#[async_trait]
impl TicketRepository for SqliteRepository {
    async fn list_tickets(&self, filter: &TicketFilter) -> Result<Vec<Ticket>> {
        let search = filter.search.clone();
        let status = filter.status.clone();

        self.conn
            .call(move |conn| {
                let mut stmt = conn
                    .prepare(schema::SELECT_TICKETS_FILTERED)
                    .map_err(wrap_err)?;
                let rows = stmt
                    .query_map(rusqlite::params![search, status], row_to_ticket)
                    .map_err(wrap_err)?;

                let mut tickets = Vec::new();
                for row_result in rows {
                    tickets.push(row_result.map_err(wrap_err)?);
                }
                Ok(tickets)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Ticket", "unknown"))
    }

    async fn get_ticket(&self, id: i64) -> Result<Option<Ticket>> {
        self.conn
            .call(move |conn| {
                let mut stmt = conn.prepare(schema::SELECT_TICKET_BY_ID).map_err(wrap_err)?;
                match stmt.query_row([id], row_to_ticket) {
                    Ok(ticket) => Ok(Some(ticket)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(wrap_err(e)),
                }
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Ticket", id))
    }

    async fn create_ticket(&self, ticket: &NewTicket) -> Result<Ticket> {
        let new_ticket = ticket.clone();
        let opened_at = format_datetime(&ticket.opened_at);

        self.conn
            .call(move |conn| {
                conn.execute(
                    schema::INSERT_TICKET,
                    rusqlite::params![
                        new_ticket.title,
                        new_ticket.description,
                        opened_at,
                        Option::<String>::None,
                        new_ticket.status,
                        new_ticket.priority_id
                    ],
                )
                .map_err(wrap_err)?;
                let id = conn.last_insert_rowid();
                Ok(new_ticket.into_ticket(id))
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Ticket", "new"))
    }

    async fn update_ticket(&self, id: i64, changes: &TicketChanges) -> Result<Ticket> {
        let title = changes.title.clone();
        let description = changes.description.clone();

        self.conn
            .call(move |conn| {
                conn.query_row(
                    schema::UPDATE_TICKET_TEXT,
                    rusqlite::params![id, title, description],
                    row_to_ticket,
                )
                .map_err(wrap_err)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Ticket", id))
    }

    async fn finalize_ticket(&self, id: i64) -> Result<Ticket> {
        self.conn
            .call(move |conn| {
                conn.query_row(
                    schema::FINALIZE_TICKET,
                    rusqlite::params![id, STATUS_FINISHED],
                    row_to_ticket,
                )
                .map_err(wrap_err)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Ticket", id))
    }

    async fn delete_ticket(&self, id: i64) -> Result<()> {
        self.conn
            .call(move |conn| {
                let rows = conn
                    .execute(schema::DELETE_TICKET, [id])
                    .map_err(wrap_err)?;
                if rows == 0 {
                    Err(wrap_err(rusqlite::Error::QueryReturnedNoRows))
                } else {
                    Ok(())
                }
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Ticket", id))
    }
}

// ============================================================================
// PriorityRepository implementation
// ============================================================================

#[async_trait]
impl PriorityRepository for SqliteRepository {
    async fn list_priorities(&self) -> Result<Vec<Priority>> {
        self.conn
            .call(|conn| {
                let mut stmt = conn.prepare(schema::SELECT_PRIORITIES).map_err(wrap_err)?;
                let rows = stmt.query_map([], row_to_priority).map_err(wrap_err)?;

                let mut priorities = Vec::new();
                for row_result in rows {
                    priorities.push(row_result.map_err(wrap_err)?);
                }
                Ok(priorities)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Priority", "unknown"))
    }

    async fn get_priority(&self, id: i64) -> Result<Option<Priority>> {
        self.conn
            .call(move |conn| {
                let mut stmt = conn
                    .prepare(schema::SELECT_PRIORITY_BY_ID)
                    .map_err(wrap_err)?;
                match stmt.query_row([id], row_to_priority) {
                    Ok(priority) => Ok(Some(priority)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(wrap_err(e)),
                }
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Priority", id))
    }

    async fn create_priority(&self, priority: &Priority) -> Result<()> {
        let id = priority.id;
        let name = priority.name.clone();

        self.conn
            .call(move |conn| {
                conn.execute(schema::INSERT_PRIORITY, rusqlite::params![id, name])
                    .map_err(wrap_err)?;
                Ok(())
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Priority", id))
    }
}
