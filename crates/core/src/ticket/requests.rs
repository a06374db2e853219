//! API request types for ticket operations.
//!
//! Field names on the wire are `titulo`, `Descricao` and `PrioridadeId`.
//! Every field is optional at the serde level so that a missing value is
//! reported by [`validate`](CreateTicketRequest::validate) alongside the
//! other failing fields instead of aborting deserialization.

use serde::{Deserialize, Serialize};

use super::error::ValidationErrors;
use super::operations::{validate_description, validate_title};
use super::types::{NewTicket, TicketChanges};

pub const TITLE_FIELD: &str = "titulo";
pub const DESCRIPTION_FIELD: &str = "Descricao";

/// Request payload for opening a ticket.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateTicketRequest {
    #[serde(
        rename = "titulo",
        alias = "Titulo",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub title: Option<String>,
    #[serde(
        rename = "Descricao",
        alias = "descricao",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<String>,
    #[serde(
        rename = "PrioridadeId",
        alias = "prioridadeId",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub priority_id: Option<i64>,
}

impl CreateTicketRequest {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            description: Some(description.into()),
            priority_id: None,
        }
    }

    pub fn with_priority(mut self, priority_id: i64) -> Self {
        self.priority_id = Some(priority_id);
        self
    }

    /// Checks every field and builds an open ticket ready to be stored.
    pub fn validate(self) -> Result<NewTicket, ValidationErrors> {
        let (title, description) = validate_text_fields(self.title, self.description)?;

        let mut ticket = NewTicket::new(title, description);
        ticket.priority_id = self.priority_id;
        Ok(ticket)
    }
}

/// Request payload for editing a ticket's title and description.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateTicketRequest {
    #[serde(
        rename = "titulo",
        alias = "Titulo",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub title: Option<String>,
    #[serde(
        rename = "Descricao",
        alias = "descricao",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<String>,
}

impl UpdateTicketRequest {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            description: Some(description.into()),
        }
    }

    pub fn validate(self) -> Result<TicketChanges, ValidationErrors> {
        let (title, description) = validate_text_fields(self.title, self.description)?;
        Ok(TicketChanges { title, description })
    }
}

fn validate_text_fields(
    title: Option<String>,
    description: Option<String>,
) -> Result<(String, String), ValidationErrors> {
    let mut errors = ValidationErrors::default();

    if let Err(e) = validate_title(title.as_deref()) {
        errors.push(TITLE_FIELD, e);
    }
    if let Err(e) = validate_description(description.as_deref()) {
        errors.push(DESCRIPTION_FIELD, e);
    }

    match (title, description) {
        (Some(title), Some(description)) if errors.is_empty() => Ok((title, description)),
        _ => Err(errors),
    }
}
