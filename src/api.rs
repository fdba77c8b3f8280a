//! HTTP gateway for the order desk
//!
//! A chat gateway posts inbound messages here and drains the replies the
//! engine queued in the outbox.

mod handlers;
mod types;

pub use handlers::create_router;
#[allow(unused_imports)] // Public API re-exports
pub use types::*;

use crate::runtime::{ConversationEngine, Outbox};
use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<ConversationEngine<Outbox>>,
    pub outbox: Arc<Outbox>,
}

impl AppState {
    pub fn new(engine: Arc<ConversationEngine<Outbox>>, outbox: Arc<Outbox>) -> Self {
        Self { engine, outbox }
    }
}
