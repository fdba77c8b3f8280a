//! Order record types

use crate::state_machine::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle status; the desk itself only ever creates new orders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    New,
}

/// Immutable record of a completed conversation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub user_id: UserId,
    pub display_name: String,
    pub product: String,
    /// Only collected when the quantity stage is enabled
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u64>,
    pub address: String,
    pub phone: String,
    pub created_at: DateTime<Utc>,
    pub status: OrderStatus,
}

/// Everything a conversation collects before the ledger assigns id and time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderDraft {
    pub user_id: UserId,
    pub display_name: String,
    pub product: String,
    pub quantity: Option<u64>,
    pub address: String,
    pub phone: String,
}
