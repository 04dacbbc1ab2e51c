use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{Order, OrderStatus};

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    /// Table receiving the order; "mesa" is the field name clients send.
    pub mesa_id: i32,
    /// Accepted for wire compatibility; the creator is always taken from the
    /// authenticated token.
    #[serde(default)]
    pub user_id: Option<i32>,
    pub items: Vec<OrderItemRequest>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemRequest {
    pub product_id: i32,
    pub quantity: i32,
    /// Price snapshot supplied by the client; stored as-is on the line.
    pub price: Decimal,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderResponse {
    pub message: String,
    pub order_id: i32,
}

/// Kitchen-queue entry: a pending order with its table number and item names.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct KitchenOrder {
    pub id: i32,
    pub mesa: i32,
    pub created_at: DateTime<Utc>,
    pub total: Decimal,
    pub status: OrderStatus,
    pub itens: Vec<KitchenItem>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct KitchenItem {
    pub name: String,
    pub quantity: i32,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ReadyResponse {
    pub message: String,
    pub order: Order,
}

/// Sales-report line for a closed order.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClosedOrder {
    pub id: i32,
    pub table_number: i32,
    pub total: Decimal,
    pub user_name: String,
    pub closed_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConsolidatedBill {
    pub table_id: i32,
    pub total: Decimal,
    pub items: Vec<ConsolidatedItem>,
    pub individual_orders: Vec<IndividualOrder>,
}

#[derive(Debug, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConsolidatedItem {
    pub product_id: i32,
    pub name: String,
    pub quantity: i32,
    pub price: Decimal,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct IndividualOrder {
    pub id: i32,
    pub status: OrderStatus,
    pub total: Decimal,
    /// Name of the waiter who placed the order.
    pub garcom: String,
    pub created_at: DateTime<Utc>,
}
