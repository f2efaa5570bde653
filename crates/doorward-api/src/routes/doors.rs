//! Routes for the access bounded context.

use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use uuid::Uuid;

use doorward_access::application::command_handlers;
use doorward_access::application::query_handlers::{self, DoorView};
use doorward_access::domain::commands;
use doorward_access::domain::values::{AccessDecision, Location, Pin};
use doorward_core::event::DomainEvent;

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for POST /interact.
///
/// `player_id` is taken as text so a malformed identity is reported as
/// `invalid_identity` rather than a body rejection.
#[derive(Debug, Deserialize)]
pub struct InteractRequest {
    /// The interacting player's UUID.
    pub player_id: String,
    /// The door location, e.g. `10,5,10`.
    pub location: String,
}

/// Request body for POST /set-pin.
#[derive(Deserialize)]
pub struct SetPinRequest {
    /// The door location.
    pub location: String,
    /// The proposed PIN.
    pub pin: String,
}

/// Response body for POST /interact.
#[derive(Debug, Serialize)]
pub struct InteractResponse {
    /// The door affected.
    pub aggregate_id: Uuid,
    /// The access decision.
    pub decision: AccessDecision,
    /// IDs of the domain events produced.
    pub event_ids: Vec<Uuid>,
}

/// Response body for an accepted POST /set-pin.
#[derive(Debug, Serialize)]
pub struct SetPinResponse {
    /// The door affected.
    pub aggregate_id: Uuid,
    /// Always `true`; rejections are returned as errors.
    pub accepted: bool,
    /// Human-readable confirmation.
    pub message: String,
    /// IDs of the domain events produced.
    pub event_ids: Vec<Uuid>,
}

fn event_ids<E: DomainEvent>(events: &[E]) -> Vec<Uuid> {
    events.iter().map(|e| e.metadata().event_id).collect()
}

/// POST /interact
#[instrument(skip(state, request), fields(location = %request.location))]
async fn interact(
    State(state): State<AppState>,
    Json(request): Json<InteractRequest>,
) -> Result<Json<InteractResponse>, ApiError> {
    let command =
        commands::Interact::from_raw(Uuid::new_v4(), &request.player_id, &request.location)?;

    info!(correlation_id = %command.correlation_id, "handling interact command");

    let result = command_handlers::handle_interact(
        &command,
        &state.registry,
        state.clock.as_ref(),
        state.effects.as_ref(),
    )?;

    Ok(Json(InteractResponse {
        aggregate_id: result.aggregate_id,
        decision: result.decision,
        event_ids: event_ids(&result.events),
    }))
}

/// POST /set-pin
#[instrument(skip(state, request), fields(location = %request.location))]
async fn set_pin(
    State(state): State<AppState>,
    Json(request): Json<SetPinRequest>,
) -> Result<Json<SetPinResponse>, ApiError> {
    // A malformed PIN is reported ahead of a malformed location.
    let location = Location::parse(&request.location)
        .map_err(|e| Pin::parse(&request.pin).err().unwrap_or(e))?;
    let command = commands::SetPin {
        correlation_id: Uuid::new_v4(),
        location,
        candidate: request.pin,
    };

    info!(correlation_id = %command.correlation_id, "handling set_pin command");

    let result =
        command_handlers::handle_set_pin(&command, &state.registry, state.clock.as_ref())?;

    Ok(Json(SetPinResponse {
        aggregate_id: result.aggregate_id,
        accepted: true,
        message: result.message,
        event_ids: event_ids(&result.events),
    }))
}

/// GET /{location}
#[instrument(skip(state))]
async fn get_door(
    State(state): State<AppState>,
    Path(location): Path<String>,
) -> Result<Json<DoorView>, ApiError> {
    let location = Location::parse(&location)?;
    let view = query_handlers::get_door(&location, &state.registry)?;
    Ok(Json(view))
}

/// Returns the router for the access context.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/interact", post(interact))
        .route("/set-pin", post(set_pin))
        .route("/{location}", get(get_door))
}
