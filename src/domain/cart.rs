use uuid::Uuid;

#[derive(Debug, Clone, PartialEq)]
pub struct CartItem {
    pub id: Uuid,
    pub book_id: Uuid,
    pub quantity: i32,
    pub session_id: String,
}

#[derive(Debug, Clone)]
pub struct NewCartItem {
    pub book_id: Uuid,
    pub quantity: i32,
    pub session_id: String,
}
