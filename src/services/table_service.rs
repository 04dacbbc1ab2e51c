use chrono::Utc;
use sea_orm::ActiveValue::NotSet;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};

use crate::{
    dto::tables::CreateTableRequest,
    entity::{
        orders::{Column as OrderCol, Entity as Orders},
        tables::{ActiveModel as TableActive, Column as TableCol, Entity as Tables, Model as TableModel},
    },
    error::{AppError, AppResult},
    models::{OrderStatus, Table, TableStatus},
    state::AppState,
};

pub async fn list_tables(state: &AppState) -> AppResult<Vec<Table>> {
    let tables = Tables::find()
        .order_by_asc(TableCol::Number)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(table_from_entity)
        .collect();
    Ok(tables)
}

/// Register a new table; the number must be positive and unused. Tables
/// always start FREE.
pub async fn create_table(
    state: &AppState,
    payload: CreateTableRequest,
) -> AppResult<(String, Table)> {
    if payload.number <= 0 {
        return Err(AppError::Validation(
            "Número da mesa deve ser um número positivo válido.".into(),
        ));
    }

    let existing = Tables::find()
        .filter(TableCol::Number.eq(payload.number))
        .one(&state.orm)
        .await?;
    if existing.is_some() {
        return Err(AppError::Conflict(format!("Mesa {} já existe.", payload.number)));
    }

    let table = TableActive {
        id: NotSet,
        number: Set(payload.number),
        status: Set(TableStatus::Free),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    let message = format!("Mesa {} cadastrada com sucesso!", table.number);
    Ok((message, table_from_entity(table)))
}

/// Reservation toggle: FREE becomes RESERVED and vice versa; an OCCUPIED
/// table is rejected with its state untouched.
pub async fn toggle_reservation(state: &AppState, id: i32) -> AppResult<(String, Table)> {
    let table = Tables::find_by_id(id).one(&state.orm).await?;
    let table = match table {
        Some(t) => t,
        None => return Err(AppError::NotFound("Mesa não encontrada.".into())),
    };

    let next = table.status.toggled_reservation().ok_or_else(|| {
        AppError::Validation(format!(
            "A Mesa {} está ocupada e não pode ser reservada ou liberada.",
            table.number
        ))
    })?;

    let message = match next {
        TableStatus::Reserved => format!("Mesa {} reservada com sucesso.", table.number),
        _ => format!("Mesa {} liberada da reserva com sucesso.", table.number),
    };

    let mut active: TableActive = table.into();
    active.status = Set(next);
    let updated = active.update(&state.orm).await?;

    Ok((message, table_from_entity(updated)))
}

/// Close a table: every open order (PENDING, READY, DELIVERED) flips to
/// CLOSED and the table goes back to FREE, as one transaction. Closing an
/// already-free table finds zero open orders and still ends FREE.
pub async fn close_table(state: &AppState, id: i32) -> AppResult<String> {
    let txn = state.orm.begin().await?;

    let table = Tables::find_by_id(id).one(&txn).await?;
    let table = match table {
        Some(t) => t,
        None => return Err(AppError::NotFound("Mesa não encontrada.".into())),
    };

    let now = sea_orm::prelude::DateTimeWithTimeZone::from(Utc::now());
    let closed = Orders::update_many()
        .col_expr(OrderCol::Status, Expr::value(OrderStatus::Closed))
        .col_expr(OrderCol::ClosedAt, Expr::value(now))
        .col_expr(OrderCol::UpdatedAt, Expr::value(now))
        .filter(OrderCol::TableId.eq(id))
        .filter(OrderCol::Status.is_in(OrderStatus::open_statuses()))
        .exec(&txn)
        .await?;

    let mut active: TableActive = table.into();
    active.status = Set(TableStatus::Free);
    active.update(&txn).await?;

    txn.commit().await?;

    tracing::info!(table_id = id, orders_closed = closed.rows_affected, "table closed");

    Ok(format!(
        "Mesa #{id} liberada e todas as comandas associadas fechadas."
    ))
}

fn table_from_entity(model: TableModel) -> Table {
    Table {
        id: model.id,
        number: model.number,
        status: model.status,
        created_at: model.created_at.with_timezone(&Utc),
    }
}
