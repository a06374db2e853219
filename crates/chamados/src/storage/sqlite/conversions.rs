//! SQLite row conversion functions.
//!
//! Pure functions for converting between SQLite rows and domain types.

use chamados_core::ticket::{Priority, Ticket};
use chrono::{DateTime, Utc};
use rusqlite::Row;

/// Convert a SQLite row to a Ticket.
///
/// Expected columns: id, title, description, opened_at, closed_at, status, priority_id
pub fn row_to_ticket(row: &Row) -> rusqlite::Result<Ticket> {
    let opened_at: String = row.get(3)?;
    let closed_at: Option<String> = row.get(4)?;

    Ok(Ticket {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        opened_at: parse_datetime(3, &opened_at)?,
        closed_at: closed_at
            .map(|s| parse_datetime(4, &s))
            .transpose()?,
        status: row.get(5)?,
        priority_id: row.get(6)?,
    })
}

/// Convert a SQLite row to a Priority.
///
/// Expected columns: id, name
pub fn row_to_priority(row: &Row) -> rusqlite::Result<Priority> {
    Ok(Priority {
        id: row.get(0)?,
        name: row.get(1)?,
    })
}

/// Parse a datetime from RFC 3339 string.
fn parse_datetime(column: usize, s: &str) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(
                column,
                rusqlite::types::Type::Text,
                Box::new(e),
            )
        })
}

/// Format a DateTime<Utc> for SQLite storage (RFC 3339).
pub fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339()
}
