use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
};

use crate::{
    dto::MessageResponse,
    dto::orders::ConsolidatedBill,
    dto::tables::{CreateTableRequest, TableMessage},
    error::AppResult,
    models::Table,
    services::{order_service, table_service},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_tables).post(create_table))
        .route("/{id}/reserve", put(toggle_reservation))
        .route("/{id}/close", put(close_table))
        .route("/{id}/orders", get(table_bill))
}

#[utoipa::path(
    get,
    path = "/tables",
    responses(
        (status = 200, description = "All tables sorted by number", body = [Table]),
    ),
    tag = "Tables"
)]
pub async fn list_tables(State(state): State<AppState>) -> AppResult<Json<Vec<Table>>> {
    let tables = table_service::list_tables(&state).await?;
    Ok(Json(tables))
}

#[utoipa::path(
    post,
    path = "/tables",
    request_body = CreateTableRequest,
    responses(
        (status = 201, description = "Table registered", body = TableMessage),
        (status = 400, description = "Invalid table number"),
        (status = 409, description = "Number already in use"),
    ),
    tag = "Tables"
)]
pub async fn create_table(
    State(state): State<AppState>,
    Json(payload): Json<CreateTableRequest>,
) -> AppResult<(StatusCode, Json<TableMessage>)> {
    let (message, table) = table_service::create_table(&state, payload).await?;
    Ok((StatusCode::CREATED, Json(TableMessage { message, table })))
}

#[utoipa::path(
    put,
    path = "/tables/{id}/reserve",
    params(("id" = i32, Path, description = "Table ID")),
    responses(
        (status = 200, description = "Reservation toggled", body = TableMessage),
        (status = 400, description = "Table is occupied"),
        (status = 404, description = "Table not found"),
    ),
    tag = "Tables"
)]
pub async fn toggle_reservation(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<TableMessage>> {
    let (message, table) = table_service::toggle_reservation(&state, id).await?;
    Ok(Json(TableMessage { message, table }))
}

#[utoipa::path(
    put,
    path = "/tables/{id}/close",
    params(("id" = i32, Path, description = "Table ID")),
    responses(
        (status = 200, description = "Table freed and its open orders closed", body = MessageResponse),
        (status = 404, description = "Table not found"),
    ),
    tag = "Tables"
)]
pub async fn close_table(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<MessageResponse>> {
    let message = table_service::close_table(&state, id).await?;
    Ok(Json(MessageResponse { message }))
}

#[utoipa::path(
    get,
    path = "/tables/{id}/orders",
    params(("id" = i32, Path, description = "Table ID")),
    responses(
        (status = 200, description = "Consolidated bill over the table's open orders", body = ConsolidatedBill),
    ),
    tag = "Tables"
)]
pub async fn table_bill(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ConsolidatedBill>> {
    let bill = order_service::table_bill(&state, id).await?;
    Ok(Json(bill))
}
