//! Property-based tests for the state machine
//!
//! These tests verify key invariants hold across all possible inputs.

use super::replies::{CMD_NEW_ORDER, CMD_PRICE_LIST, CMD_START};
use super::transition::parse_quantity;
use super::*;
use crate::catalog::Catalog;
use crate::orders::{OrderDraft, OrderLedger};
use proptest::prelude::*;
use std::sync::Arc;

// ============================================================================
// Test Helpers
// ============================================================================

const USER: UserId = UserId(100);

fn test_context(ask_quantity: bool) -> ConvContext {
    ConvContext::new(USER, Arc::new(Catalog::default()))
        .with_flow(FlowOptions { ask_quantity })
        .with_dispatcher(Some(UserId(900)))
}

fn message(text: &str) -> Event {
    Event::user_message(text, Sender::with_username("tester"))
}

fn is_menu_command(text: &str) -> bool {
    matches!(text.trim(), CMD_PRICE_LIST | CMD_NEW_ORDER)
}

/// Drive a transition the way the engine does: execute `PlaceOrder` against
/// a ledger and feed `OrderPlaced` back in. Returns the final state and the
/// number of orders placed.
fn step(
    state: &ConvState,
    ctx: &ConvContext,
    ledger: &OrderLedger,
    event: Event,
) -> (ConvState, usize) {
    let mut state = state.clone();
    let mut placed = 0;
    let mut events = vec![event];

    while let Some(event) = events.pop() {
        let result = transition(&state, ctx, event).expect("user messages are accepted everywhere");
        state = result.new_state;
        for effect in result.effects {
            if let Effect::PlaceOrder { draft } = effect {
                placed += 1;
                events.push(Event::OrderPlaced {
                    order: ledger.place(draft),
                });
            }
        }
    }

    (state, placed)
}

// ============================================================================
// Arbitrary Generators
// ============================================================================

fn arb_free_text() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-zA-Z0-9 ]{0,20}",
        "[а-яА-Я0-9 .,]{1,20}",
        Just(String::new()),
        Just("+79991234567".to_string()),
    ]
}

fn arb_input() -> impl Strategy<Value = String> {
    prop_oneof![
        3 => arb_free_text(),
        1 => Just(CMD_START.to_string()),
        1 => Just(CMD_PRICE_LIST.to_string()),
        2 => Just(CMD_NEW_ORDER.to_string()),
        1 => (-5i64..20).prop_map(|n| n.to_string()),
    ]
}

fn arb_state() -> impl Strategy<Value = ConvState> {
    prop_oneof![
        Just(ConvState::Idle),
        Just(ConvState::AwaitingProduct),
        arb_free_text().prop_map(|product| ConvState::AwaitingQuantity { product }),
        (arb_free_text(), proptest::option::of(1u64..50))
            .prop_map(|(product, quantity)| ConvState::AwaitingAddress { product, quantity }),
        (arb_free_text(), proptest::option::of(1u64..50), arb_free_text()).prop_map(
            |(product, quantity, address)| ConvState::AwaitingPhone {
                product,
                quantity,
                address
            }
        ),
    ]
}

fn arb_non_positive_quantity() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-zA-Z]{1,8}",
        (-1000i64..=0).prop_map(|n| n.to_string()),
        Just(String::new()),
        Just("1.5".to_string()),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    // Invariant 1: user messages are accepted in every state
    #[test]
    fn prop_user_messages_never_fail(
        state in arb_state(),
        text in arb_input(),
        ask_quantity in any::<bool>(),
    ) {
        let result = transition(&state, &test_context(ask_quantity), message(&text));
        prop_assert!(result.is_ok());
    }

    // Invariant 2: orders are placed exactly once per completed walk
    #[test]
    fn prop_one_order_per_completed_conversation(
        inputs in proptest::collection::vec(arb_input(), 0..40),
        ask_quantity in any::<bool>(),
    ) {
        let ctx = test_context(ask_quantity);
        let ledger = OrderLedger::new();
        let mut state = ConvState::Idle;
        let mut completed = 0;

        for text in inputs {
            let was_awaiting_phone = matches!(state, ConvState::AwaitingPhone { .. });
            let (next, placed) = step(&state, &ctx, &ledger, message(&text));

            if was_awaiting_phone {
                completed += 1;
                prop_assert_eq!(placed, 1);
                prop_assert_eq!(&next, &ConvState::Idle);
            } else {
                prop_assert_eq!(placed, 0);
            }
            if !ask_quantity {
                let asked_quantity = matches!(next, ConvState::AwaitingQuantity { .. });
                prop_assert!(!asked_quantity, "quantity stage is disabled");
            }
            state = next;
        }

        prop_assert_eq!(ledger.len(), completed);
    }

    // Invariant 3: unrecognized input in Idle changes nothing
    #[test]
    fn prop_idle_unrecognized_input_is_inert(text in arb_free_text(), ask_quantity in any::<bool>()) {
        prop_assume!(!is_menu_command(&text));

        let result = transition(&ConvState::Idle, &test_context(ask_quantity), message(&text)).unwrap();
        prop_assert_eq!(result.new_state, ConvState::Idle);
        prop_assert_eq!(
            result.effects,
            vec![Effect::reply_with_menu(replies::WELCOME, Menu::main())]
        );
    }

    // Invariant 4: bad quantities re-prompt without touching the state
    #[test]
    fn prop_bad_quantity_keeps_state(product in arb_free_text(), text in arb_non_positive_quantity()) {
        let state = ConvState::AwaitingQuantity { product };
        let result = transition(&state, &test_context(true), message(&text)).unwrap();

        prop_assert_eq!(result.new_state, state);
        prop_assert_eq!(result.effects, vec![Effect::reply(replies::QUANTITY_RETRY)]);
    }

    // Invariant 5: positive quantities advance and are stored
    #[test]
    fn prop_positive_quantity_advances(product in arb_free_text(), quantity in 1u64..10_000) {
        let state = ConvState::AwaitingQuantity { product: product.clone() };
        let result = transition(&state, &test_context(true), message(&quantity.to_string())).unwrap();

        prop_assert_eq!(
            result.new_state,
            ConvState::AwaitingAddress { product, quantity: Some(quantity) }
        );
    }

    // Invariant 6: collected text reaches the order verbatim
    #[test]
    fn prop_fields_are_copied_verbatim(
        product in arb_free_text(),
        quantity in 1u64..100,
        address in arb_free_text(),
        phone in arb_free_text(),
        ask_quantity in any::<bool>(),
    ) {
        let ctx = test_context(ask_quantity);
        let mut state = transition(&ConvState::Idle, &ctx, message(CMD_NEW_ORDER)).unwrap().new_state;
        state = transition(&state, &ctx, message(&product)).unwrap().new_state;
        if ask_quantity {
            state = transition(&state, &ctx, message(&quantity.to_string())).unwrap().new_state;
        }
        state = transition(&state, &ctx, message(&address)).unwrap().new_state;
        let result = transition(&state, &ctx, message(&phone)).unwrap();

        prop_assert_eq!(result.new_state, ConvState::Idle);
        prop_assert_eq!(
            result.effects,
            vec![Effect::PlaceOrder {
                draft: OrderDraft {
                    user_id: USER,
                    display_name: "@tester".to_string(),
                    product,
                    quantity: ask_quantity.then_some(quantity),
                    address,
                    phone,
                }
            }]
        );
    }

    // Invariant 7: the quantity parser only accepts strictly positive integers
    #[test]
    fn prop_parse_quantity_is_positive(text in "\\PC{0,12}") {
        if let Some(quantity) = parse_quantity(&text) {
            prop_assert!(quantity > 0);
        }
    }
}
