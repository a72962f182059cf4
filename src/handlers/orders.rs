use actix_web::{web, HttpRequest, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::order::{CheckoutDetails, Order, OrderItem};
use crate::errors::AppError;
use crate::PgOrderService;

use super::session_id;

// ── Request / response DTOs ──────────────────────────────────────────────────

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub customer_name: String,
    pub customer_email: String,
    pub customer_address: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemResponse {
    pub id: Uuid,
    pub book_id: Uuid,
    pub quantity: i32,
    pub price: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    pub id: Uuid,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_address: String,
    pub order_date: String,
    pub total_amount: String,
    pub status: String,
    pub order_items: Vec<OrderItemResponse>,
}

impl From<OrderItem> for OrderItemResponse {
    fn from(item: OrderItem) -> Self {
        OrderItemResponse {
            id: item.id,
            book_id: item.book_id,
            quantity: item.quantity,
            price: item.price.to_string(),
        }
    }
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        OrderResponse {
            id: order.id,
            customer_name: order.customer_name,
            customer_email: order.customer_email,
            customer_address: order.customer_address,
            order_date: order.order_date.to_rfc3339(),
            total_amount: order.total_amount.to_string(),
            status: order.status,
            order_items: order
                .items
                .into_iter()
                .map(OrderItemResponse::from)
                .collect(),
        }
    }
}

fn to_responses(orders: Vec<Order>) -> Vec<OrderResponse> {
    orders.into_iter().map(OrderResponse::from).collect()
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// POST /api/orders
///
/// Converts the session's cart into a confirmed order. Any workflow failure
/// (empty cart, vanished book, insufficient stock, bad customer details) comes
/// back as a 400 with the failure message.
#[utoipa::path(
    post,
    path = "/api/orders",
    params(
        ("X-Session-Id" = String, Header, description = "Opaque cart session token"),
    ),
    request_body = CreateOrderRequest,
    responses(
        (status = 200, description = "Order placed", body = OrderResponse),
        (status = 400, description = "Order could not be placed"),
    ),
    tag = "orders"
)]
pub async fn create_order(
    req: HttpRequest,
    orders: web::Data<PgOrderService>,
    body: web::Json<CreateOrderRequest>,
) -> Result<HttpResponse, AppError> {
    let session = session_id(&req)?;
    let body = body.into_inner();
    let details = CheckoutDetails {
        customer_name: body.customer_name,
        customer_email: body.customer_email,
        customer_address: body.customer_address,
    };

    let order = web::block(move || orders.create_order(&session, details))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(OrderResponse::from(order)))
}

/// GET /api/orders
#[utoipa::path(
    get,
    path = "/api/orders",
    responses(
        (status = 200, description = "All orders", body = [OrderResponse]),
    ),
    tag = "orders"
)]
pub async fn list_orders(orders: web::Data<PgOrderService>) -> Result<HttpResponse, AppError> {
    let result = web::block(move || orders.get_all_orders())
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(to_responses(result)))
}

/// GET /api/orders/{id}
#[utoipa::path(
    get,
    path = "/api/orders/{id}",
    params(
        ("id" = Uuid, Path, description = "Order UUID"),
    ),
    responses(
        (status = 200, description = "Order found", body = OrderResponse),
        (status = 404, description = "Order not found"),
    ),
    tag = "orders"
)]
pub async fn get_order(
    orders: web::Data<PgOrderService>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();

    let result = web::block(move || orders.get_order_by_id(id))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    match result {
        Some(order) => Ok(HttpResponse::Ok().json(OrderResponse::from(order))),
        None => Err(AppError::NotFound),
    }
}

/// GET /api/orders/customer/{email}
#[utoipa::path(
    get,
    path = "/api/orders/customer/{email}",
    params(
        ("email" = String, Path, description = "Customer email"),
    ),
    responses(
        (status = 200, description = "The customer's orders, newest first", body = [OrderResponse]),
    ),
    tag = "orders"
)]
pub async fn orders_by_customer(
    orders: web::Data<PgOrderService>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let email = path.into_inner();

    let result = web::block(move || orders.get_orders_by_customer_email(&email))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(to_responses(result)))
}

/// GET /api/orders/status/{status}
#[utoipa::path(
    get,
    path = "/api/orders/status/{status}",
    params(
        ("status" = String, Path, description = "Order status, e.g. CONFIRMED"),
    ),
    responses(
        (status = 200, description = "Orders in that status, newest first", body = [OrderResponse]),
    ),
    tag = "orders"
)]
pub async fn orders_by_status(
    orders: web::Data<PgOrderService>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let status = path.into_inner();

    let result = web::block(move || orders.get_orders_by_status(&status))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(to_responses(result)))
}
