//! Pure functions for validating and joining ticket data.

use std::collections::HashMap;

use super::error::TicketError;
use super::types::{Priority, Ticket, TicketDetails};

/// Minimum title length, in characters.
pub const TITLE_MIN_LENGTH: usize = 10;

/// Maximum title length, in characters.
pub const TITLE_MAX_LENGTH: usize = 100;

/// Validates a ticket title.
///
/// The title must be present, not blank, and between
/// [`TITLE_MIN_LENGTH`] and [`TITLE_MAX_LENGTH`] characters long.
pub fn validate_title(title: Option<&str>) -> Result<&str, TicketError> {
    let title = match title {
        Some(t) if !t.trim().is_empty() => t,
        _ => return Err(TicketError::TitleRequired),
    };

    let len = title.chars().count();
    if !(TITLE_MIN_LENGTH..=TITLE_MAX_LENGTH).contains(&len) {
        return Err(TicketError::TitleLength {
            min: TITLE_MIN_LENGTH,
            max: TITLE_MAX_LENGTH,
        });
    }

    Ok(title)
}

/// Validates a ticket description.
///
/// Like the title, an absent or blank description counts as missing. There
/// is no length limit.
pub fn validate_description(description: Option<&str>) -> Result<&str, TicketError> {
    match description {
        Some(d) if !d.trim().is_empty() => Ok(d),
        _ => Err(TicketError::DescriptionRequired),
    }
}

/// Attaches each ticket's priority by following its `priority_id`.
///
/// A `priority_id` with no matching row resolves to `None`.
pub fn join_priorities(tickets: Vec<Ticket>, priorities: &[Priority]) -> Vec<TicketDetails> {
    let by_id: HashMap<i64, &Priority> = priorities.iter().map(|p| (p.id, p)).collect();

    tickets
        .into_iter()
        .map(|ticket| {
            let priority = ticket
                .priority_id
                .and_then(|id| by_id.get(&id))
                .map(|p| (*p).clone());
            TicketDetails::new(ticket, priority)
        })
        .collect()
}
