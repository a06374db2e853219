use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Status written when a ticket is created.
pub const STATUS_OPEN: &str = "Open";

/// Status written by the finalize action.
pub const STATUS_FINISHED: &str = "Finished";

/// A support request tracked by the API.
///
/// `status` is free text: the service only ever writes [`STATUS_OPEN`] and
/// [`STATUS_FINISHED`], but nothing restricts transitions between values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub opened_at: DateTime<Utc>,
    pub closed_at: Option<DateTime<Utc>>,
    pub status: String,
    /// Foreign key to [`Priority::id`]. Not checked against the priority table.
    pub priority_id: Option<i64>,
}

impl Ticket {
    /// Overwrites title and description, leaving every other field untouched.
    pub fn apply_changes(&mut self, changes: TicketChanges) {
        self.title = changes.title;
        self.description = changes.description;
    }

    /// Marks the ticket as finished. Calling it again is a no-op.
    pub fn finalize(&mut self) {
        self.status = STATUS_FINISHED.to_string();
    }
}

/// A ticket that has not been persisted yet. The store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTicket {
    pub title: String,
    pub description: String,
    pub opened_at: DateTime<Utc>,
    pub status: String,
    pub priority_id: Option<i64>,
}

impl NewTicket {
    /// Creates an open ticket stamped with the current time.
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            opened_at: Utc::now(),
            status: STATUS_OPEN.to_string(),
            priority_id: None,
        }
    }

    /// Sets the priority foreign key.
    pub fn with_priority(mut self, priority_id: i64) -> Self {
        self.priority_id = Some(priority_id);
        self
    }

    /// Builds the persisted ticket once the store has picked an id.
    pub fn into_ticket(self, id: i64) -> Ticket {
        Ticket {
            id,
            title: self.title,
            description: self.description,
            opened_at: self.opened_at,
            closed_at: None,
            status: self.status,
            priority_id: self.priority_id,
        }
    }
}

/// Validated fields an update is allowed to change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketChanges {
    pub title: String,
    pub description: String,
}

/// A named urgency classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Priority {
    pub id: i64,
    pub name: Option<String>,
}

impl Priority {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: Some(name.into()),
        }
    }
}

/// Read model: a ticket with its priority resolved through `priority_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TicketDetails {
    #[serde(flatten)]
    pub ticket: Ticket,
    pub priority: Option<Priority>,
}

impl TicketDetails {
    pub fn new(ticket: Ticket, priority: Option<Priority>) -> Self {
        Self { ticket, priority }
    }
}
