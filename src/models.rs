use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
#[allow(unused_imports)]
use sea_orm::sea_query::StringLen;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Lifecycle status of a dining table.
///
/// FREE and RESERVED swap through the reservation toggle; OCCUPIED is entered
/// implicitly when an order is placed and left only by closing the table.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TableStatus {
    #[sea_orm(string_value = "FREE")]
    Free,
    #[sea_orm(string_value = "RESERVED")]
    Reserved,
    #[sea_orm(string_value = "OCCUPIED")]
    Occupied,
}

impl TableStatus {
    /// Reservation toggle: FREE and RESERVED are each other's successor; an
    /// occupied table cannot be reserved or released through this path.
    pub fn toggled_reservation(self) -> Option<TableStatus> {
        match self {
            TableStatus::Free => Some(TableStatus::Reserved),
            TableStatus::Reserved => Some(TableStatus::Free),
            TableStatus::Occupied => None,
        }
    }
}

/// Status of a single order ticket. Orders start PENDING and are bulk-moved
/// to CLOSED when their table is closed.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    #[sea_orm(string_value = "PENDING")]
    Pending,
    #[sea_orm(string_value = "READY")]
    Ready,
    #[sea_orm(string_value = "DELIVERED")]
    Delivered,
    #[sea_orm(string_value = "CLOSED")]
    Closed,
}

impl OrderStatus {
    /// Every status that counts as an open order on a table.
    pub fn open_statuses() -> [OrderStatus; 3] {
        [
            OrderStatus::Pending,
            OrderStatus::Ready,
            OrderStatus::Delivered,
        ]
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    #[sea_orm(string_value = "GARCOM")]
    Garcom,
    #[sea_orm(string_value = "ADMIN")]
    Admin,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Table {
    pub id: i32,
    pub number: i32,
    pub status: TableStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i32,
    pub name: String,
    pub price: Decimal,
    pub available: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: i32,
    pub table_id: i32,
    pub user_id: i32,
    pub status: OrderStatus,
    pub total: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub ready_at: Option<DateTime<Utc>>,
    pub closed_at: Option<DateTime<Utc>>,
}

/// User as exposed over the API; the password never leaves the database.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: i32,
    pub username: String,
    pub name: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reservation_toggle_is_an_involution_on_free_and_reserved() {
        let reserved = TableStatus::Free.toggled_reservation().unwrap();
        assert_eq!(reserved, TableStatus::Reserved);
        let back = reserved.toggled_reservation().unwrap();
        assert_eq!(back, TableStatus::Free);
    }

    #[test]
    fn occupied_table_cannot_toggle_reservation() {
        assert_eq!(TableStatus::Occupied.toggled_reservation(), None);
    }

    #[test]
    fn closed_is_not_an_open_status() {
        assert!(!OrderStatus::open_statuses().contains(&OrderStatus::Closed));
    }
}
