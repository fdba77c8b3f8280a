//! Effects produced by state transitions

use super::replies::{CMD_NEW_ORDER, CMD_PRICE_LIST};
use crate::orders::OrderDraft;
use crate::state_machine::state::UserId;
use serde::{Deserialize, Serialize};

/// Effects to be executed after state transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Send a message to the user the session belongs to
    SendToUser { text: String, menu: Option<Menu> },

    /// Append an order to the ledger; answered with `Event::OrderPlaced`
    PlaceOrder { draft: OrderDraft },

    /// Forward an order notification to the dispatcher
    NotifyDispatcher { dispatcher: UserId, text: String },
}

impl Effect {
    pub fn reply(text: impl Into<String>) -> Self {
        Effect::SendToUser {
            text: text.into(),
            menu: None,
        }
    }

    pub fn reply_with_menu(text: impl Into<String>, menu: Menu) -> Self {
        Effect::SendToUser {
            text: text.into(),
            menu: Some(menu),
        }
    }
}

/// Reply keyboard shown under a message, one `Vec` per row of buttons
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Menu {
    pub rows: Vec<Vec<String>>,
}

impl Menu {
    /// The two-button main menu
    pub fn main() -> Self {
        Self {
            rows: vec![vec![CMD_PRICE_LIST.to_string(), CMD_NEW_ORDER.to_string()]],
        }
    }
}
