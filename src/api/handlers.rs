//! HTTP request handlers

use super::types::{
    DispatcherOutboxResponse, ErrorResponse, MessageRequest, MessageResponse, OrderListResponse,
    OrderResponse, OutboxResponse, SessionResponse, SuccessResponse, VersionResponse,
};
use super::AppState;
use crate::runtime::InboundMessage;
use crate::state_machine::UserId;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Inbound chat messages
        .route("/api/messages", post(post_message))
        // Outbound queues
        .route("/api/users/:id/outbox", get(drain_user_outbox))
        .route("/api/dispatcher/outbox", get(drain_dispatcher_outbox))
        // Orders
        .route("/api/orders", get(list_orders))
        .route("/api/orders/:id", get(get_order))
        .route("/api/users/:id/orders", get(list_user_orders))
        // Sessions
        .route("/api/sessions/:id", get(get_session).delete(reset_session))
        // Version
        .route("/version", get(get_version))
        .with_state(state)
}

// ============================================================
// Messages
// ============================================================

async fn post_message(
    State(state): State<AppState>,
    Json(req): Json<MessageRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    if req.user_id == 0 {
        return Err(AppError::BadRequest("user_id must be a chat id, not 0".to_string()));
    }

    let user_id = UserId(req.user_id);
    tracing::debug!(user_id = %user_id, "Inbound message");

    let new_state = state
        .engine
        .on_message(InboundMessage::new(user_id, req.sender, req.text))
        .await;

    Ok(Json(MessageResponse {
        state: new_state.name(),
    }))
}

// ============================================================
// Outbox
// ============================================================

async fn drain_user_outbox(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Json<OutboxResponse> {
    Json(OutboxResponse {
        messages: state.outbox.drain_user(UserId(id)),
    })
}

async fn drain_dispatcher_outbox(State(state): State<AppState>) -> Json<DispatcherOutboxResponse> {
    Json(DispatcherOutboxResponse {
        notifications: state.outbox.drain_dispatcher(),
    })
}

// ============================================================
// Orders
// ============================================================

async fn list_orders(State(state): State<AppState>) -> Json<OrderListResponse> {
    Json(OrderListResponse {
        orders: state.engine.ledger().list(),
    })
}

async fn list_user_orders(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Json<OrderListResponse> {
    Json(OrderListResponse {
        orders: state.engine.ledger().for_user(UserId(id)),
    })
}

async fn get_order(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<OrderResponse>, AppError> {
    state
        .engine
        .ledger()
        .get(&id)
        .map(|order| Json(OrderResponse { order }))
        .ok_or_else(|| AppError::NotFound(format!("Order not found: {id}")))
}

// ============================================================
// Sessions
// ============================================================

async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<SessionResponse>, AppError> {
    let user_id = UserId(id);
    let handle = state
        .engine
        .sessions()
        .get(user_id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("No session for user {user_id}")))?;

    let session_state = handle.lock().await.state.clone();
    Ok(Json(SessionResponse {
        user_id,
        state: session_state,
    }))
}

async fn reset_session(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<SuccessResponse>, AppError> {
    let user_id = UserId(id);
    if state.engine.sessions().reset(user_id).await {
        Ok(Json(SuccessResponse { success: true }))
    } else {
        Err(AppError::NotFound(format!("No session for user {user_id}")))
    }
}

// ============================================================
// Version
// ============================================================

async fn get_version() -> Json<VersionResponse> {
    Json(VersionResponse {
        version: env!("CARGO_PKG_VERSION"),
    })
}

// ============================================================
// Error Handling
// ============================================================

#[derive(Debug)]
enum AppError {
    BadRequest(String),
    NotFound(String),
    #[allow(dead_code)] // No handler can fail internally yet
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(ErrorResponse::new(message));
        (status, body).into_response()
    }
}
