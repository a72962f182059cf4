use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use uuid::Uuid;

pub const STATUS_PENDING: &str = "PENDING";
pub const STATUS_CONFIRMED: &str = "CONFIRMED";

#[derive(Debug, Clone)]
pub struct Order {
    pub id: Uuid,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_address: String,
    pub order_date: DateTime<Utc>,
    pub total_amount: BigDecimal,
    pub status: String,
    pub items: Vec<OrderItem>,
}

#[derive(Debug, Clone)]
pub struct OrderItem {
    pub id: Uuid,
    pub order_id: Uuid,
    pub book_id: Uuid,
    pub quantity: i32,
    /// Unit price captured at purchase time, decoupled from the book's
    /// current catalog price.
    pub price: BigDecimal,
}

/// Customer details supplied at checkout.
#[derive(Debug, Clone)]
pub struct CheckoutDetails {
    pub customer_name: String,
    pub customer_email: String,
    pub customer_address: String,
}

/// Line item input for order finalization.
#[derive(Debug, Clone)]
pub struct NewOrderItem {
    pub book_id: Uuid,
    pub quantity: i32,
    pub price: BigDecimal,
}
