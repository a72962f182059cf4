use bigdecimal::BigDecimal;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq)]
pub struct Book {
    pub id: Uuid,
    pub title: String,
    pub author: String,
    pub isbn: Option<String>,
    pub price: BigDecimal,
    pub description: Option<String>,
    pub stock_quantity: i32,
}

/// Catalog input for both insert and full-record update.
#[derive(Debug, Clone)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub isbn: Option<String>,
    pub price: BigDecimal,
    pub description: Option<String>,
    pub stock_quantity: i32,
}
