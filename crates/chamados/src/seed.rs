//! Startup seeding for fresh stores.

use chamados_core::storage::{PriorityRepository, RepositoryError, TicketFilter, TicketRepository};
use chamados_core::ticket::{default_priorities, demo_tickets};

/// Inserts the default priorities if the priority table is empty.
///
/// Returns the number of priorities inserted.
pub async fn seed_priorities(repo: &dyn PriorityRepository) -> Result<usize, RepositoryError> {
    if !repo.list_priorities().await?.is_empty() {
        tracing::debug!("Priorities already present, skipping seed");
        return Ok(0);
    }

    let priorities = default_priorities();
    for priority in &priorities {
        repo.create_priority(priority).await?;
    }

    tracing::info!(count = priorities.len(), "Seeded default priorities");
    Ok(priorities.len())
}

/// Inserts the demo tickets if there are no tickets yet.
///
/// Returns the number of tickets inserted.
pub async fn seed_demo_tickets(repo: &dyn TicketRepository) -> Result<usize, RepositoryError> {
    if !repo.list_tickets(&TicketFilter::default()).await?.is_empty() {
        tracing::debug!("Tickets already present, skipping demo data");
        return Ok(0);
    }

    let tickets = demo_tickets();
    for ticket in &tickets {
        let created = repo.create_ticket(ticket).await?;
        tracing::debug!(ticket_id = created.id, title = %created.title, "Seeded demo ticket");
    }

    tracing::info!(count = tickets.len(), "Seeded demo tickets");
    Ok(tickets.len())
}
