//! Core conversation state machine
//!
//! Pure state transitions: the engine feeds events in, executes the
//! returned effects, and feeds any resulting events back in.

mod effect;
pub mod event;
pub mod replies;
pub mod state;
pub(crate) mod transition;

#[cfg(test)]
mod proptests;

pub use effect::{Effect, Menu};
pub use event::{Event, Sender};
pub use state::{ConvContext, ConvState, FlowOptions, UserId};
pub use transition::transition;
