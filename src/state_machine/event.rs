//! Events that can occur in a conversation

use crate::orders::Order;
use crate::state_machine::state::UserId;
use serde::{Deserialize, Serialize};

/// Events that trigger state transitions
#[derive(Debug, Clone)]
pub enum Event {
    /// Inbound chat message from the user
    UserMessage { text: String, sender: Sender },

    /// The ledger accepted the order requested by `Effect::PlaceOrder`
    OrderPlaced { order: Order },
}

impl Event {
    pub fn user_message(text: impl Into<String>, sender: Sender) -> Self {
        Event::UserMessage {
            text: text.into(),
            sender,
        }
    }
}

/// Profile fields the transport knows about the author of a message
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sender {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

impl Sender {
    #[cfg(test)]
    pub fn with_username(username: impl Into<String>) -> Self {
        Self {
            username: Some(username.into()),
            ..Self::default()
        }
    }

    #[cfg(test)]
    pub fn with_names(first_name: impl Into<String>, last_name: Option<&str>) -> Self {
        Self {
            username: None,
            first_name: Some(first_name.into()),
            last_name: last_name.map(String::from),
        }
    }

    /// Best-effort human-readable identity
    ///
    /// Prefers the `@handle`, then "given family", then whichever name is
    /// present, and finally the numeric id.
    pub fn display_name(&self, user_id: UserId) -> String {
        if let Some(handle) = non_empty(self.username.as_deref()) {
            return format!("@{}", handle.trim_start_matches('@'));
        }

        match (
            non_empty(self.first_name.as_deref()),
            non_empty(self.last_name.as_deref()),
        ) {
            (Some(first), Some(last)) => format!("{first} {last}"),
            (Some(name), None) | (None, Some(name)) => name.to_string(),
            (None, None) => user_id.to_string(),
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
