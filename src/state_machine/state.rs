//! Conversation state types

use crate::catalog::Catalog;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Chat identity of a user or of the dispatcher
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub i64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for UserId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

// ============================================================================
// Conversation State
// ============================================================================

/// Conversation state
///
/// Each step carries only what has been collected so far, so a session can
/// never hold an address without a product or a phone without an address.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ConvState {
    /// Main menu, nothing collected
    #[default]
    Idle,

    /// Order started, waiting for the free-form product description
    AwaitingProduct,

    /// Waiting for a strictly positive quantity (optional stage)
    AwaitingQuantity { product: String },

    /// Waiting for the delivery address
    AwaitingAddress {
        product: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        quantity: Option<u64>,
    },

    /// Waiting for the contact phone; the next message completes the order
    AwaitingPhone {
        product: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        quantity: Option<u64>,
        address: String,
    },
}

impl ConvState {
    /// Stable snake_case name, matching the serialized `type` tag
    pub fn name(&self) -> &'static str {
        match self {
            ConvState::Idle => "idle",
            ConvState::AwaitingProduct => "awaiting_product",
            ConvState::AwaitingQuantity { .. } => "awaiting_quantity",
            ConvState::AwaitingAddress { .. } => "awaiting_address",
            ConvState::AwaitingPhone { .. } => "awaiting_phone",
        }
    }
}

/// Optional stages of the intake flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FlowOptions {
    /// Insert `AwaitingQuantity` between product and address
    pub ask_quantity: bool,
}

/// Context for a conversation (immutable configuration)
#[derive(Debug, Clone)]
pub struct ConvContext {
    pub user_id: UserId,
    pub flow: FlowOptions,
    /// Where order notifications go; `None` suppresses them
    pub dispatcher: Option<UserId>,
    pub catalog: Arc<Catalog>,
}

impl ConvContext {
    pub fn new(user_id: UserId, catalog: Arc<Catalog>) -> Self {
        Self {
            user_id,
            flow: FlowOptions::default(),
            dispatcher: None,
            catalog,
        }
    }

    #[must_use]
    pub fn with_flow(mut self, flow: FlowOptions) -> Self {
        self.flow = flow;
        self
    }

    #[must_use]
    pub fn with_dispatcher(mut self, dispatcher: Option<UserId>) -> Self {
        self.dispatcher = dispatcher;
        self
    }
}
