//! API request and response types

use crate::orders::Order;
use crate::runtime::{DispatcherNotice, OutboundMessage};
use crate::state_machine::{ConvState, Sender, UserId};
use serde::{Deserialize, Serialize};

/// Inbound chat message forwarded by the gateway
#[derive(Debug, Deserialize)]
pub struct MessageRequest {
    pub user_id: i64,
    #[serde(flatten)]
    pub sender: Sender,
    /// Missing for non-text messages (stickers, photos); handled as ""
    #[serde(default)]
    pub text: String,
}

/// Session state after handling a message
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub state: &'static str,
}

/// Replies queued for one user
#[derive(Debug, Serialize)]
pub struct OutboxResponse {
    pub messages: Vec<OutboundMessage>,
}

/// Notifications queued for the dispatcher
#[derive(Debug, Serialize)]
pub struct DispatcherOutboxResponse {
    pub notifications: Vec<DispatcherNotice>,
}

#[derive(Debug, Serialize)]
pub struct OrderListResponse {
    pub orders: Vec<Order>,
}

#[derive(Debug, Serialize)]
pub struct OrderResponse {
    pub order: Order,
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub user_id: UserId,
    pub state: ConvState,
}

/// Response for actions without a payload
#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

#[derive(Debug, Serialize)]
pub struct VersionResponse {
    pub version: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
