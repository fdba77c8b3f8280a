//! Runtime for executing conversations
//!
//! Connects the pure state machine to the session store, the order ledger
//! and the chat transport.

mod engine;
mod outbox;
pub mod traits;


pub use engine::{ConversationEngine, EngineSettings, InboundMessage};
pub use outbox::{DispatcherNotice, Outbox, OutboundMessage};
