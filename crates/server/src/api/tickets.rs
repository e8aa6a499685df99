//! Ticket API handlers.

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::sync::Arc;
use edutech_core::{status, Ticket, TicketError};

use super::error::ApiError;
use super::links::Links;
use crate::state::AppState;

// ============================================================================
// Request Types
// ============================================================================

/// Request body for creating or updating a ticket
#[derive(Debug, Deserialize)]
pub struct TicketBody {
    /// Only honored on create; nonzero ids are stored as given
    pub id: Option<i64>,
    pub titulo: Option<String>,
    pub descripcion: Option<String>,
    /// Uppercased before saving; absent or empty means "default" on create
    /// and "unchanged" on update
    pub estado: Option<String>,
    /// Only honored on create together with a nonzero id
    pub fechacreacion: Option<DateTime<Utc>>,
    pub clienteid: Option<i64>,
}

impl TicketBody {
    fn title(&self) -> Result<String, ApiError> {
        match self.titulo.as_deref().map(str::trim) {
            Some(title) if !title.is_empty() => Ok(title.to_string()),
            _ => Err(ApiError::bad_request("titulo is required")),
        }
    }

    fn customer_id(&self) -> Result<i64, ApiError> {
        self.clienteid
            .ok_or_else(|| ApiError::bad_request("clienteid is required"))
    }

    fn status(&self) -> Option<String> {
        self.estado
            .as_deref()
            .map(status::normalize)
            .filter(|s| !s.is_empty())
    }
}

/// Query parameters for changing a ticket's status
#[derive(Debug, Deserialize)]
pub struct ChangeStatusParams {
    #[serde(rename = "nuevoEstado")]
    pub nuevo_estado: String,
}

// ============================================================================
// Response Shaping
// ============================================================================

fn entity(state: &AppState, ticket: Ticket) -> Response {
    if state.hypermedia() {
        Json(state.links().ticket_model(ticket)).into_response()
    } else {
        Json(ticket).into_response()
    }
}

fn collection(state: &AppState, tickets: Vec<Ticket>, links: Links) -> Response {
    if state.hypermedia() {
        Json(state.links().collection(tickets, links)).into_response()
    } else {
        Json(tickets).into_response()
    }
}

fn load(state: &AppState, id: i64) -> Result<Ticket, ApiError> {
    state
        .service()
        .get_by_id(id)?
        .ok_or_else(|| TicketError::NotFound(id).into())
}

// ============================================================================
// Handlers
// ============================================================================

/// List all tickets
pub async fn list_tickets(State(state): State<Arc<AppState>>) -> Result<Response, ApiError> {
    let tickets = state.service().list_all()?;
    let links = state.links().all_tickets_links();
    Ok(collection(&state, tickets, links))
}

/// Get a ticket by ID
pub async fn get_ticket(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Response, ApiError> {
    let ticket = load(&state, id)?;
    Ok(entity(&state, ticket))
}

/// Create a new ticket
pub async fn create_ticket(
    State(state): State<Arc<AppState>>,
    Json(body): Json<TicketBody>,
) -> Result<Response, ApiError> {
    let ticket = Ticket {
        id: body.id.unwrap_or(0),
        title: body.title()?,
        customer_id: body.customer_id()?,
        status: body.status().unwrap_or_default(),
        created_at: body.fechacreacion.unwrap_or_else(Utc::now),
        description: body.descripcion,
    };

    let saved = state.service().save(ticket)?;
    let location = state.links().ticket_href(saved.id);

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        entity(&state, saved),
    )
        .into_response())
}

/// Replace a ticket's title, description, status and customer
pub async fn update_ticket(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(body): Json<TicketBody>,
) -> Result<Response, ApiError> {
    let mut ticket = load(&state, id)?;

    ticket.title = body.title()?;
    ticket.customer_id = body.customer_id()?;
    if let Some(new_status) = body.status() {
        ticket.status = new_status;
    }
    ticket.description = body.descripcion;

    let saved = state.service().save(ticket)?;
    Ok(entity(&state, saved))
}

/// Delete a ticket
pub async fn delete_ticket(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    load(&state, id)?;
    state.service().delete(id)?;
    Ok(StatusCode::NO_CONTENT)
}

/// Change a ticket's status to the uppercase form of `nuevoEstado`
pub async fn change_status(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Query(params): Query<ChangeStatusParams>,
) -> Result<Response, ApiError> {
    let mut ticket = load(&state, id)?;
    ticket.status = status::normalize(&params.nuevo_estado);

    let saved = state.service().save(ticket)?;
    Ok(entity(&state, saved))
}

/// List a customer's tickets (204 when there are none)
pub async fn list_by_customer(
    State(state): State<Arc<AppState>>,
    Path(customer_id): Path<i64>,
) -> Result<Response, ApiError> {
    let tickets = state.service().list_by_customer(customer_id)?;
    if tickets.is_empty() {
        return Ok(StatusCode::NO_CONTENT.into_response());
    }

    let links = state.links().customer_tickets_links(customer_id);
    Ok(collection(&state, tickets, links))
}

/// List tickets in a status, matched case-insensitively (204 when there are none)
pub async fn list_by_status(
    State(state): State<Arc<AppState>>,
    Path(raw_status): Path<String>,
) -> Result<Response, ApiError> {
    let normalized = status::normalize(&raw_status);
    let tickets = state.service().list_by_status(&normalized)?;
    if tickets.is_empty() {
        return Ok(StatusCode::NO_CONTENT.into_response());
    }

    let links = state.links().status_tickets_links(&normalized);
    Ok(collection(&state, tickets, links))
}
