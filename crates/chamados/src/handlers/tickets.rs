//! Ticket CRUD handlers.

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};

use chamados_core::storage::{RepositoryError, TicketFilter};
use chamados_core::ticket::{
    join_priorities, CreateTicketRequest, Ticket, TicketDetails, UpdateTicketRequest,
};

use crate::{
    handlers::{error::body_rejection, AppError},
    state::AppState,
};

/// List tickets (GET /chamados?search=&situacao=).
///
/// Always 200; an empty result is an empty array.
pub async fn list_tickets(
    State(state): State<AppState>,
    Query(filter): Query<TicketFilter>,
) -> Result<Json<Vec<TicketDetails>>, AppError> {
    tracing::debug!(filter = ?filter, "Listing tickets");

    let tickets = state.ticket_repo.list_tickets(&filter).await?;
    let priorities = state.priority_repo.list_priorities().await?;

    Ok(Json(join_priorities(tickets, &priorities)))
}

/// Get a single ticket by ID (GET /chamados/{id}).
///
/// The priority is resolved through the ticket's own `priority_id`.
pub async fn get_ticket(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<TicketDetails>, AppError> {
    let ticket = state
        .ticket_repo
        .get_ticket(id)
        .await?
        .ok_or_else(|| RepositoryError::not_found("Ticket", id))?;

    let priority = match ticket.priority_id {
        Some(priority_id) => state.priority_repo.get_priority(priority_id).await?,
        None => None,
    };

    Ok(Json(TicketDetails::new(ticket, priority)))
}

/// Open a new ticket (POST /chamados).
pub async fn create_ticket(
    State(state): State<AppState>,
    payload: Result<Json<CreateTicketRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(request) = payload.map_err(body_rejection)?;
    tracing::debug!(request = ?request, "Received create ticket request");

    let new_ticket = request.validate()?;
    let ticket = state.ticket_repo.create_ticket(&new_ticket).await?;

    tracing::info!(ticket_id = ticket.id, title = %ticket.title, "Created new ticket");

    let location = format!("/chamados/{}", ticket.id);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(ticket)))
}

/// Edit a ticket's title and description (PUT /chamados/{id}).
///
/// Status, dates and priority are left as they are.
pub async fn update_ticket(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    payload: Result<Json<UpdateTicketRequest>, JsonRejection>,
) -> Result<Json<Ticket>, AppError> {
    let Json(request) = payload.map_err(body_rejection)?;
    tracing::debug!(ticket_id = id, request = ?request, "Received update ticket request");

    let changes = request.validate()?;
    let ticket = state.ticket_repo.update_ticket(id, &changes).await?;

    tracing::info!(ticket_id = id, "Updated ticket");

    Ok(Json(ticket))
}

/// Mark a ticket as finished (POST /chamados/{id}/Finalizar).
///
/// Idempotent: finalizing a finished ticket returns it unchanged.
pub async fn finalize_ticket(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Ticket>, AppError> {
    let ticket = state.ticket_repo.finalize_ticket(id).await?;

    tracing::info!(ticket_id = id, status = %ticket.status, "Finalized ticket");

    Ok(Json(ticket))
}

/// Delete a ticket by ID (DELETE /chamados/{id}).
pub async fn delete_ticket(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    tracing::debug!(ticket_id = id, "Received delete ticket request");

    state.ticket_repo.delete_ticket(id).await?;

    tracing::info!(ticket_id = id, "Deleted ticket");

    Ok(StatusCode::NO_CONTENT)
}
