//! Order ledger
//!
//! Append-only, in-memory record of every completed conversation.

mod model;

pub use model::{Order, OrderDraft, OrderStatus};

use crate::state_machine::UserId;
use chrono::Utc;
use std::sync::{PoisonError, RwLock};

/// Creation-time prefix of order ids
const ORDER_ID_TIME_FORMAT: &str = "%Y%m%d%H%M%S";

/// Thread-safe, append-only order ledger
#[derive(Debug, Default)]
pub struct OrderLedger {
    orders: RwLock<Vec<Order>>,
}

impl OrderLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an order and append it to the ledger
    ///
    /// Never fails. The id is the creation time followed by a per-ledger
    /// sequence number taken under the append lock, so two orders created
    /// within the same second still get distinct ids, in creation order.
    pub fn create(
        &self,
        user_id: UserId,
        display_name: impl Into<String>,
        product: impl Into<String>,
        address: impl Into<String>,
        phone: impl Into<String>,
        quantity: Option<u64>,
    ) -> Order {
        let mut orders = self.orders.write().unwrap_or_else(PoisonError::into_inner);
        let created_at = Utc::now();
        let sequence = orders.len() + 1;

        let order = Order {
            id: format!("{}-{sequence:04}", created_at.format(ORDER_ID_TIME_FORMAT)),
            user_id,
            display_name: display_name.into(),
            product: product.into(),
            quantity,
            address: address.into(),
            phone: phone.into(),
            created_at,
            status: OrderStatus::New,
        };

        orders.push(order.clone());
        order
    }

    /// Create an order from the fields a finished conversation collected
    pub fn place(&self, draft: OrderDraft) -> Order {
        let OrderDraft {
            user_id,
            display_name,
            product,
            quantity,
            address,
            phone,
        } = draft;
        self.create(user_id, display_name, product, address, phone, quantity)
    }

    /// All orders in creation order
    pub fn list(&self) -> Vec<Order> {
        self.orders
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn get(&self, id: &str) -> Option<Order> {
        self.orders
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .find(|order| order.id == id)
            .cloned()
    }

    /// Orders placed by one user, oldest first
    pub fn for_user(&self, user_id: UserId) -> Vec<Order> {
        self.orders
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|order| order.user_id == user_id)
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.orders.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    #[allow(dead_code)] // Pairs with len()
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
