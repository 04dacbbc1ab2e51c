use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::Product;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateProductRequest {
    pub name: String,
    pub price: Decimal,
    /// Defaults to true when omitted.
    pub available: Option<bool>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProductMessage {
    pub message: String,
    pub product: Product,
}
