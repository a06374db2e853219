use serde::Deserialize;

use crate::serde::deserialize_optional_string;
use crate::ticket::Ticket;

/// Filter for listing tickets. Both criteria are optional and combine with AND.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TicketFilter {
    /// Substring that must appear in the title (case-sensitive).
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub search: Option<String>,
    /// Exact status value.
    #[serde(
        default,
        rename = "situacao",
        alias = "status",
        deserialize_with = "deserialize_optional_string"
    )]
    pub status: Option<String>,
}

impl TicketFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Returns true if the ticket satisfies every criterion that is set.
    pub fn matches(&self, ticket: &Ticket) -> bool {
        let search_ok = self
            .search
            .as_deref()
            .is_none_or(|s| ticket.title.contains(s));
        let status_ok = self.status.as_deref().is_none_or(|s| ticket.status == s);
        search_ok && status_ok
    }
}
