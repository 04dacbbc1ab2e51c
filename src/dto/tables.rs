use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::Table;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateTableRequest {
    pub number: i32,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TableMessage {
    pub message: String,
    pub table: Table,
}
