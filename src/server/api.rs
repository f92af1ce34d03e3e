use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
};
use uuid::Uuid;

use super::generate::TicketGenerator;
use super::store::TicketStore;
use crate::errors::GenerateError;
use crate::ticket::{
    GenerateRequest, MessageResponse, TicketResponse, TicketStatus, TicketsResponse,
    UpdateStatusRequest,
};

// ── Shared application state ──────────────────────────────────────────

pub struct AppState {
    pub store: TicketStore,
    pub generator: TicketGenerator,
}

pub type SharedState = Arc<AppState>;

// ── Error handling ────────────────────────────────────────────────────

pub enum ApiError {
    NotFound(String),
    BadRequest(String),
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };
        (status, Json(serde_json::json!({"error": message}))).into_response()
    }
}

fn internal(err: anyhow::Error) -> ApiError {
    ApiError::Internal(err.to_string())
}

// ── Router ────────────────────────────────────────────────────────────

pub fn api_router() -> Router<SharedState> {
    Router::new()
        .route("/api/generate-tickets", post(generate_tickets))
        .route("/api/tickets", get(list_tickets).delete(clear_tickets))
        .route("/api/tickets/{id}", delete(delete_ticket))
        .route("/api/tickets/{id}/status", put(update_status))
        .route("/health", get(health_check))
}

// ── Handlers ──────────────────────────────────────────────────────────

async fn health_check() -> &'static str {
    "ok"
}

async fn generate_tickets(
    State(state): State<SharedState>,
    Json(req): Json<GenerateRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let prompt = req.prompt.unwrap_or_default();
    let tickets = match state.generator.generate(&prompt).await {
        Ok(tickets) => tickets,
        Err(GenerateError::EmptyPrompt) => {
            return Err(ApiError::BadRequest("Prompt is required".to_string()));
        }
        Err(err) => {
            tracing::error!(error = %err, "ticket generation failed");
            return Err(ApiError::Internal("Failed to generate tickets".to_string()));
        }
    };

    let stored = state.store.add(tickets).map_err(internal)?;
    tracing::info!(count = stored.len(), "generated tickets");
    Ok(Json(TicketsResponse { tickets: stored }))
}

async fn list_tickets(State(state): State<SharedState>) -> Result<impl IntoResponse, ApiError> {
    let tickets = state.store.list().map_err(internal)?;
    Ok(Json(TicketsResponse { tickets }))
}

async fn update_status(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateStatusRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let status = req
        .status
        .as_deref()
        .unwrap_or_default()
        .parse::<TicketStatus>()
        .map_err(|_| ApiError::BadRequest("Invalid status".to_string()))?;

    match state.store.update_status(id, status).map_err(internal)? {
        Some(ticket) => Ok(Json(TicketResponse { ticket })),
        None => Err(ApiError::NotFound("Ticket not found".to_string())),
    }
}

async fn delete_ticket(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    match state.store.delete(id).map_err(internal)? {
        true => Ok(Json(MessageResponse {
            message: "Ticket deleted successfully".to_string(),
        })),
        false => Err(ApiError::NotFound("Ticket not found".to_string())),
    }
}

async fn clear_tickets(State(state): State<SharedState>) -> Result<impl IntoResponse, ApiError> {
    state.store.clear().map_err(internal)?;
    Ok(Json(MessageResponse {
        message: "All tickets cleared".to_string(),
    }))
}

// ── Tests ─────────────────────────────────────────────────────────────
