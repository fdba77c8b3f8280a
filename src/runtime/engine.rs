//! Conversation engine
//!
//! Runs one inbound message through the state machine while holding that
//! user's session lock, and executes the resulting effects.

use super::traits::Transport;
use crate::catalog::Catalog;
use crate::orders::OrderLedger;
use crate::session::SessionStore;
use crate::state_machine::{
    transition, ConvContext, ConvState, Effect, Event, FlowOptions, Sender, UserId,
};
use std::sync::Arc;

/// Configuration shared by every conversation
#[derive(Debug, Clone, Default)]
pub struct EngineSettings {
    pub flow: FlowOptions,
    pub dispatcher: Option<UserId>,
    pub catalog: Arc<Catalog>,
}

/// One message as delivered by the transport
#[derive(Debug, Clone)]
pub struct InboundMessage {
    pub user_id: UserId,
    pub sender: Sender,
    pub text: String,
}

impl InboundMessage {
    pub fn new(user_id: UserId, sender: Sender, text: impl Into<String>) -> Self {
        Self {
            user_id,
            sender,
            text: text.into(),
        }
    }
}

/// Generic conversation engine that can work with any transport
pub struct ConversationEngine<T: Transport> {
    settings: EngineSettings,
    sessions: Arc<SessionStore>,
    ledger: Arc<OrderLedger>,
    transport: Arc<T>,
}

impl<T: Transport> ConversationEngine<T> {
    pub fn new(settings: EngineSettings, transport: Arc<T>) -> Self {
        Self {
            settings,
            sessions: Arc::new(SessionStore::new()),
            ledger: Arc::new(OrderLedger::new()),
            transport,
        }
    }

    pub fn sessions(&self) -> &Arc<SessionStore> {
        &self.sessions
    }

    pub fn ledger(&self) -> &Arc<OrderLedger> {
        &self.ledger
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Handle one inbound message and return the session state afterwards
    ///
    /// Messages from the same user are handled one at a time; messages from
    /// different users proceed in parallel.
    pub async fn on_message(&self, message: InboundMessage) -> ConvState {
        let InboundMessage {
            user_id,
            sender,
            text,
        } = message;

        let handle = self.sessions.get_or_create(user_id).await;
        let mut session = handle.lock().await;
        session.touch();

        let context = self.context(user_id);

        // Effects may feed events back in (PlaceOrder -> OrderPlaced)
        let mut events_to_process = vec![Event::user_message(text, sender)];

        while let Some(event) = events_to_process.pop() {
            // Pure state transition
            let result = match transition(&session.state, &context, event) {
                Ok(r) => r,
                Err(e) => {
                    tracing::error!(user_id = %user_id, error = %e, "Dropping event");
                    continue;
                }
            };

            if result.new_state != session.state {
                tracing::debug!(
                    user_id = %user_id,
                    from = session.state.name(),
                    to = result.new_state.name(),
                    "State transition"
                );
            }
            session.state = result.new_state;

            for effect in result.effects {
                if let Some(generated_event) = self.execute_effect(user_id, effect).await {
                    events_to_process.push(generated_event);
                }
            }
        }

        session.state.clone()
    }

    fn context(&self, user_id: UserId) -> ConvContext {
        ConvContext::new(user_id, Arc::clone(&self.settings.catalog))
            .with_flow(self.settings.flow)
            .with_dispatcher(self.settings.dispatcher)
    }

    /// Execute an effect and optionally return a generated event
    async fn execute_effect(&self, user_id: UserId, effect: Effect) -> Option<Event> {
        match effect {
            Effect::SendToUser { text, menu } => {
                if let Err(e) = self
                    .transport
                    .send_to_user(user_id, &text, menu.as_ref())
                    .await
                {
                    tracing::warn!(user_id = %user_id, error = %e, "Failed to send message to user");
                }
                None
            }

            Effect::PlaceOrder { draft } => {
                let order = self.ledger.place(draft);
                tracing::info!(
                    order_id = %order.id,
                    user_id = %order.user_id,
                    client = %order.display_name,
                    total_orders = self.ledger.len(),
                    "Order created"
                );
                Some(Event::OrderPlaced { order })
            }

            Effect::NotifyDispatcher { dispatcher, text } => {
                if let Err(e) = self.transport.send_to_dispatcher(dispatcher, &text).await {
                    tracing::warn!(
                        dispatcher = %dispatcher,
                        error = %e,
                        "Failed to notify dispatcher"
                    );
                }
                None
            }
        }
    }
}
