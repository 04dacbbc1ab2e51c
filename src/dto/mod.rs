use serde::Serialize;
use utoipa::ToSchema;

pub mod auth;
pub mod orders;
pub mod products;
pub mod tables;
pub mod users;

#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}
