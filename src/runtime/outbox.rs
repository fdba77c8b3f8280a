//! In-memory outbox transport
//!
//! Queues outbound messages per destination until the chat gateway drains
//! them over HTTP.

use super::traits::{Transport, TransportError};
use crate::state_machine::{Menu, UserId};
use async_trait::async_trait;
use serde::Serialize;
use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, PoisonError};

/// Undrained messages kept per destination; older ones are dropped first
pub const DEFAULT_OUTBOX_CAPACITY: usize = 256;

/// A message waiting for delivery to a user
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutboundMessage {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub menu: Option<Menu>,
}

/// A notification waiting for delivery to the dispatcher
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DispatcherNotice {
    pub dispatcher: UserId,
    pub text: String,
}

/// Transport that parks messages in memory
#[derive(Debug)]
pub struct Outbox {
    capacity: usize,
    users: Mutex<HashMap<UserId, VecDeque<OutboundMessage>>>,
    dispatcher: Mutex<VecDeque<DispatcherNotice>>,
}

impl Default for Outbox {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_OUTBOX_CAPACITY)
    }
}

impl Outbox {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            users: Mutex::new(HashMap::new()),
            dispatcher: Mutex::new(VecDeque::new()),
        }
    }

    /// Take every queued message for a user, oldest first
    pub fn drain_user(&self, user_id: UserId) -> Vec<OutboundMessage> {
        self.users
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&user_id)
            .map(Vec::from)
            .unwrap_or_default()
    }

    /// Take every queued dispatcher notification, oldest first
    pub fn drain_dispatcher(&self) -> Vec<DispatcherNotice> {
        self.dispatcher
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .drain(..)
            .collect()
    }

    fn push_bounded<T>(queue: &mut VecDeque<T>, item: T, capacity: usize) -> bool {
        let overflowed = queue.len() >= capacity;
        if overflowed {
            queue.pop_front();
        }
        queue.push_back(item);
        overflowed
    }
}

#[async_trait]
impl Transport for Outbox {
    async fn send_to_user(
        &self,
        user_id: UserId,
        text: &str,
        menu: Option<&Menu>,
    ) -> Result<(), TransportError> {
        let message = OutboundMessage {
            text: text.to_string(),
            menu: menu.cloned(),
        };
        let mut users = self.users.lock().unwrap_or_else(PoisonError::into_inner);
        if Self::push_bounded(users.entry(user_id).or_default(), message, self.capacity) {
            tracing::warn!(user_id = %user_id, "Outbox full, dropped oldest message");
        }
        Ok(())
    }

    async fn send_to_dispatcher(&self, dispatcher: UserId, text: &str) -> Result<(), TransportError> {
        let notice = DispatcherNotice {
            dispatcher,
            text: text.to_string(),
        };
        let mut queue = self.dispatcher.lock().unwrap_or_else(PoisonError::into_inner);
        if Self::push_bounded(&mut queue, notice, self.capacity) {
            tracing::warn!(dispatcher = %dispatcher, "Dispatcher outbox full, dropped oldest notice");
        }
        Ok(())
    }
}
