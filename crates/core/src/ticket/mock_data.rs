//! Seed data for fresh databases and demos.

use super::types::{NewTicket, Priority};

/// Priorities inserted when the priority table is empty.
pub fn default_priorities() -> Vec<Priority> {
    vec![
        Priority::new(1, "Low"),
        Priority::new(2, "Medium"),
        Priority::new(3, "High"),
    ]
}

/// Sample tickets for `--demo-data`.
pub fn demo_tickets() -> Vec<NewTicket> {
    vec![
        NewTicket::new("Access screen error", "The user could not log in").with_priority(3),
        NewTicket::new("System running slowly", "Screens take too long to load").with_priority(2),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ticket::operations::{validate_description, validate_title};

    #[test]
    fn test_default_priorities_have_unique_ids() {
        let priorities = default_priorities();
        let mut ids: Vec<i64> = priorities.iter().map(|p| p.id).collect();
        ids.sort_unstable();
        ids.dedup();

        assert_eq!(ids.len(), priorities.len());
    }

    #[test]
    fn test_demo_tickets_reference_default_priorities() {
        let priorities = default_priorities();

        for ticket in demo_tickets() {
            let priority_id = ticket.priority_id.unwrap();
            assert!(priorities.iter().any(|p| p.id == priority_id));
        }
    }

    #[test]
    fn test_demo_tickets_pass_validation() {
        for ticket in demo_tickets() {
            assert!(validate_title(Some(&ticket.title)).is_ok());
            assert!(validate_description(Some(&ticket.description)).is_ok());
        }
    }
}
