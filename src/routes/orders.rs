use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
};

use crate::{
    dto::orders::{ClosedOrder, CreateOrderRequest, CreateOrderResponse, KitchenOrder, ReadyResponse},
    error::AppResult,
    middleware::auth::AuthUser,
    services::order_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_order))
        .route("/pending", get(list_pending))
        .route("/closed", get(list_closed))
        .route("/{id}/ready", put(mark_ready))
}

#[utoipa::path(
    post,
    path = "/orders",
    request_body = CreateOrderRequest,
    responses(
        (status = 201, description = "Order placed and table marked occupied", body = CreateOrderResponse),
        (status = 400, description = "Empty or malformed item list"),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "Table not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Orders"
)]
pub async fn create_order(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateOrderRequest>,
) -> AppResult<(StatusCode, Json<CreateOrderResponse>)> {
    let order_id = order_service::create_order(&state, &user, payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(CreateOrderResponse {
            message: "Pedido enviado com sucesso e mesa atualizada!".into(),
            order_id,
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/orders/pending",
    responses(
        (status = 200, description = "Kitchen queue, oldest first", body = [KitchenOrder]),
    ),
    tag = "Orders"
)]
pub async fn list_pending(State(state): State<AppState>) -> AppResult<Json<Vec<KitchenOrder>>> {
    let orders = order_service::list_pending(&state).await?;
    Ok(Json(orders))
}

#[utoipa::path(
    get,
    path = "/orders/closed",
    responses(
        (status = 200, description = "Closed orders, most recent first", body = [ClosedOrder]),
    ),
    tag = "Orders"
)]
pub async fn list_closed(State(state): State<AppState>) -> AppResult<Json<Vec<ClosedOrder>>> {
    let orders = order_service::list_closed(&state).await?;
    Ok(Json(orders))
}

#[utoipa::path(
    put,
    path = "/orders/{id}/ready",
    params(("id" = i32, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Order marked ready", body = ReadyResponse),
        (status = 404, description = "Order not found"),
    ),
    tag = "Orders"
)]
pub async fn mark_ready(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ReadyResponse>> {
    let order = order_service::mark_ready(&state, id).await?;
    Ok(Json(ReadyResponse {
        message: format!("Pedido #{id} marcado como PRONTO."),
        order,
    }))
}
