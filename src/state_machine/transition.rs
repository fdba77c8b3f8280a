//! Pure state transition function
//!
//! Given the same state, context and event, `transition` always yields the
//! same next state and effects. It never touches the ledger or the
//! transport; the engine does that by executing the effects.

use super::replies;
use super::{ConvContext, ConvState, Effect, Event, Menu};
use crate::orders::OrderDraft;
use thiserror::Error;

/// Result of a state transition
#[derive(Debug)]
pub struct TransitionResult {
    pub new_state: ConvState,
    pub effects: Vec<Effect>,
}

impl TransitionResult {
    pub fn new(state: ConvState) -> Self {
        Self {
            new_state: state,
            effects: vec![],
        }
    }

    #[must_use]
    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }
}

/// Errors that can occur during transition
///
/// User messages are accepted in every state; only internal events can
/// arrive somewhere they do not belong.
#[derive(Debug, Error)]
pub enum TransitionError {
    #[error("Invalid transition: {0}")]
    InvalidTransition(String),
}

/// Pure transition function
pub fn transition(
    state: &ConvState,
    context: &ConvContext,
    event: Event,
) -> Result<TransitionResult, TransitionError> {
    match (state, event) {
        // ============================================================
        // Main menu
        // ============================================================
        (ConvState::Idle, Event::UserMessage { text, .. }) => Ok(handle_menu_command(context, &text)),

        // ============================================================
        // Collecting order fields
        // ============================================================

        // Product is free-form, stored verbatim
        (ConvState::AwaitingProduct, Event::UserMessage { text, .. }) => {
            if context.flow.ask_quantity {
                Ok(
                    TransitionResult::new(ConvState::AwaitingQuantity { product: text })
                        .with_effect(Effect::reply(replies::QUANTITY_PROMPT)),
                )
            } else {
                Ok(TransitionResult::new(ConvState::AwaitingAddress {
                    product: text,
                    quantity: None,
                })
                .with_effect(Effect::reply(replies::ADDRESS_PROMPT)))
            }
        }

        // The only validated input: re-prompt in place until it parses
        (ConvState::AwaitingQuantity { product }, Event::UserMessage { text, .. }) => {
            match parse_quantity(&text) {
                Some(quantity) => Ok(TransitionResult::new(ConvState::AwaitingAddress {
                    product: product.clone(),
                    quantity: Some(quantity),
                })
                .with_effect(Effect::reply(replies::ADDRESS_PROMPT))),
                None => Ok(TransitionResult::new(state.clone())
                    .with_effect(Effect::reply(replies::QUANTITY_RETRY))),
            }
        }

        (ConvState::AwaitingAddress { product, quantity }, Event::UserMessage { text, .. }) => {
            Ok(TransitionResult::new(ConvState::AwaitingPhone {
                product: product.clone(),
                quantity: *quantity,
                address: text,
            })
            .with_effect(Effect::reply(replies::PHONE_PROMPT)))
        }

        // Phone completes the conversation; the session is empty from here on
        (
            ConvState::AwaitingPhone {
                product,
                quantity,
                address,
            },
            Event::UserMessage { text, sender },
        ) => {
            let draft = OrderDraft {
                user_id: context.user_id,
                display_name: sender.display_name(context.user_id),
                product: product.clone(),
                quantity: *quantity,
                address: address.clone(),
                phone: text,
            };
            Ok(TransitionResult::new(ConvState::Idle).with_effect(Effect::PlaceOrder { draft }))
        }

        // ============================================================
        // Order placed by the ledger
        // ============================================================

        // Dispatcher first, then the customer's confirmation
        (ConvState::Idle, Event::OrderPlaced { order }) => {
            let mut result = TransitionResult::new(ConvState::Idle);
            if let Some(dispatcher) = context.dispatcher {
                result = result.with_effect(Effect::NotifyDispatcher {
                    dispatcher,
                    text: replies::dispatcher_notification(&order),
                });
            }
            Ok(result.with_effect(Effect::reply(replies::order_confirmation(&order))))
        }

        (state, event @ Event::OrderPlaced { .. }) => Err(TransitionError::InvalidTransition(
            format!("No transition from {state:?} with event {event:?}"),
        )),
    }
}

/// Idle accepts three commands; anything else re-shows the welcome menu
fn handle_menu_command(context: &ConvContext, text: &str) -> TransitionResult {
    match text.trim() {
        replies::CMD_PRICE_LIST => TransitionResult::new(ConvState::Idle)
            .with_effect(Effect::reply(context.catalog.price_list())),
        replies::CMD_NEW_ORDER => TransitionResult::new(ConvState::AwaitingProduct)
            .with_effect(Effect::reply(replies::product_prompt(&context.catalog))),
        // CMD_START and unrecognized input
        _ => TransitionResult::new(ConvState::Idle)
            .with_effect(Effect::reply_with_menu(replies::WELCOME, Menu::main())),
    }
}

/// Strictly positive integer, surrounding whitespace ignored
pub(crate) fn parse_quantity(text: &str) -> Option<u64> {
    text.trim().parse::<u64>().ok().filter(|quantity| *quantity > 0)
}
