use axum::{Json, Router, extract::State, http::StatusCode, routing::get};

use crate::{
    dto::products::{CreateProductRequest, ProductMessage},
    error::AppResult,
    models::Product,
    services::product_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(list_products).post(create_product))
}

#[utoipa::path(
    get,
    path = "/products",
    responses(
        (status = 200, description = "Product catalog", body = [Product]),
    ),
    tag = "Products"
)]
pub async fn list_products(State(state): State<AppState>) -> AppResult<Json<Vec<Product>>> {
    let products = product_service::list_products(&state.pool).await?;
    Ok(Json(products))
}

#[utoipa::path(
    post,
    path = "/products",
    request_body = CreateProductRequest,
    responses(
        (status = 201, description = "Product registered", body = ProductMessage),
        (status = 400, description = "Missing name or non-positive price"),
    ),
    tag = "Products"
)]
pub async fn create_product(
    State(state): State<AppState>,
    Json(payload): Json<CreateProductRequest>,
) -> AppResult<(StatusCode, Json<ProductMessage>)> {
    let product = product_service::create_product(&state.pool, payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(ProductMessage {
            message: "Produto cadastrado com sucesso!".into(),
            product,
        }),
    ))
}
