use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ServiceError;

/// Upper bound on a note, in characters.
pub const MAX_NOTE_LEN: usize = 2000;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaceOrderInput {
    pub service_id: Uuid,
    #[serde(default)]
    pub extra_info: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateNoteInput {
    #[serde(default)]
    pub extra_info: Option<String>,
}

/// One order as shown in the history view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderEntry {
    pub order_id: Uuid,
    pub service_id: Uuid,
    pub service_name: String,
    pub ordered_at: DateTime<FixedOffset>,
    pub extra_info: Option<String>,
    pub price_cents: i64,
    pub price: String,
}

impl From<models::order::HistoryRow> for OrderEntry {
    fn from(r: models::order::HistoryRow) -> Self {
        Self {
            price: common::format_cents(r.price_cents),
            order_id: r.order_id,
            service_id: r.service_id,
            service_name: r.service_name,
            ordered_at: r.ordered_at,
            extra_info: r.extra_info,
            price_cents: r.price_cents,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderHistory {
    pub orders: Vec<OrderEntry>,
    pub total_spent_cents: i64,
    /// `total_spent_cents` with two decimals.
    pub total_spent: String,
}

impl OrderHistory {
    pub fn new(orders: Vec<OrderEntry>) -> Self {
        let total_spent_cents = total_cents(&orders);
        Self { total_spent: common::format_cents(total_spent_cents), total_spent_cents, orders }
    }
}

/// Sum of prices over `orders`; zero for none.
pub fn total_cents(orders: &[OrderEntry]) -> i64 {
    orders.iter().map(|o| o.price_cents).sum()
}

/// Blank notes mean "no note". Non-blank notes are kept verbatim.
pub fn normalize_note(note: Option<String>) -> Result<Option<String>, ServiceError> {
    match note {
        Some(text) if !text.trim().is_empty() => {
            if text.chars().count() > MAX_NOTE_LEN {
                return Err(ServiceError::Validation(format!("extra_info too long (<={MAX_NOTE_LEN})")));
            }
            Ok(Some(text))
        }
        _ => Ok(None),
    }
}
