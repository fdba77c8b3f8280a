//! Trait abstractions for runtime I/O
//!
//! The engine only talks to the outside world through `Transport`, which
//! lets tests swap in recording or failing implementations.

use crate::state_machine::{Menu, UserId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Delivery failures reported by a transport
#[allow(dead_code)] // The in-memory Outbox never fails a send
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Destination {0} is unreachable")]
    Unreachable(UserId),
    #[error("Transport closed")]
    Closed,
}

/// Outbound side of the chat channel
///
/// Sends are fire-and-forget from the engine's point of view: a returned
/// error is logged, never retried, and never stops the conversation.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send a message, optionally with a reply keyboard, to a user
    async fn send_to_user(
        &self,
        user_id: UserId,
        text: &str,
        menu: Option<&Menu>,
    ) -> Result<(), TransportError>;

    /// Send an order notification to the dispatcher
    async fn send_to_dispatcher(&self, dispatcher: UserId, text: &str) -> Result<(), TransportError>;
}

// ============================================================================
// Arc implementation for trait objects
// ============================================================================

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn send_to_user(
        &self,
        user_id: UserId,
        text: &str,
        menu: Option<&Menu>,
    ) -> Result<(), TransportError> {
        (**self).send_to_user(user_id, text, menu).await
    }

    async fn send_to_dispatcher(&self, dispatcher: UserId, text: &str) -> Result<(), TransportError> {
        (**self).send_to_dispatcher(dispatcher, text).await
    }
}
