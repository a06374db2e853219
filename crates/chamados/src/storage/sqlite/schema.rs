//! SQLite schema definitions and SQL query constants.

/// SQL statement to create all tables.
///
/// `tickets.id` uses AUTOINCREMENT so ids of deleted tickets are never handed
/// out again. Foreign key enforcement is left off: a ticket may reference a
/// priority id that does not exist, and reads resolve it to no priority.
pub const CREATE_TABLES: &str = r#"
-- Priorities table (lookup list)
CREATE TABLE IF NOT EXISTS priorities (
    id INTEGER PRIMARY KEY,
    name TEXT
);

-- Tickets table
CREATE TABLE IF NOT EXISTS tickets (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    description TEXT NOT NULL,
    opened_at TEXT NOT NULL,
    closed_at TEXT,
    status TEXT NOT NULL DEFAULT 'Open',
    priority_id INTEGER REFERENCES priorities(id)
);

CREATE INDEX IF NOT EXISTS idx_tickets_status ON tickets(status);
CREATE INDEX IF NOT EXISTS idx_tickets_priority_id ON tickets(priority_id);
"#;

// Ticket queries
pub const INSERT_TICKET: &str = r#"
INSERT INTO tickets (title, description, opened_at, closed_at, status, priority_id)
VALUES (?1, ?2, ?3, ?4, ?5, ?6)
"#;

pub const SELECT_TICKET_BY_ID: &str = r#"
SELECT id, title, description, opened_at, closed_at, status, priority_id
FROM tickets
WHERE id = ?1
"#;

/// `?1` is the title substring, `?2` the exact status; NULL disables a criterion.
pub const SELECT_TICKETS_FILTERED: &str = r#"
SELECT id, title, description, opened_at, closed_at, status, priority_id
FROM tickets
WHERE (?1 IS NULL OR instr(title, ?1) > 0)
  AND (?2 IS NULL OR status = ?2)
ORDER BY id ASC
"#;

/// Writes only the text columns so a concurrent finalize is never undone.
pub const UPDATE_TICKET_TEXT: &str = r#"
UPDATE tickets
SET title = ?2, description = ?3
WHERE id = ?1
RETURNING id, title, description, opened_at, closed_at, status, priority_id
"#;

/// `?2` is the finished status value.
pub const FINALIZE_TICKET: &str = r#"
UPDATE tickets
SET status = ?2
WHERE id = ?1
RETURNING id, title, description, opened_at, closed_at, status, priority_id
"#;

pub const DELETE_TICKET: &str = r#"
DELETE FROM tickets
WHERE id = ?1
"#;

// Priority queries
pub const INSERT_PRIORITY: &str = r#"
INSERT INTO priorities (id, name)
VALUES (?1, ?2)
"#;

pub const SELECT_PRIORITIES: &str = r#"
SELECT id, name
FROM priorities
ORDER BY id ASC
"#;

pub const SELECT_PRIORITY_BY_ID: &str = r#"
SELECT id, name
FROM priorities
WHERE id = ?1
"#;
