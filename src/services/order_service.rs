use std::collections::HashMap;

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};

use crate::{
    billing::{self, BillLine, OpenOrder},
    dto::orders::{
        ClosedOrder, ConsolidatedBill, CreateOrderRequest, KitchenItem, KitchenOrder,
        OrderItemRequest,
    },
    entity::{
        order_items::{ActiveModel as OrderItemActive, Column as OrderItemCol, Entity as OrderItems},
        orders::{ActiveModel as OrderActive, Column as OrderCol, Entity as Orders, Model as OrderModel},
        products::Entity as Products,
        tables::{ActiveModel as TableActive, Column as TableCol, Entity as Tables},
        users::{Column as UserCol, Entity as Users},
    },
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::{Order, OrderStatus, TableStatus},
    state::AppState,
};

/// Create a new order for a table: order header, line items and the table
/// status flip to OCCUPIED commit as one transaction. Returns the order id.
pub async fn create_order(
    state: &AppState,
    user: &AuthUser,
    payload: CreateOrderRequest,
) -> AppResult<i32> {
    if payload.items.is_empty() {
        return Err(AppError::Validation(
            "Dados do pedido incompletos ou carrinho vazio.".into(),
        ));
    }
    if payload.items.iter().any(|item| item.quantity <= 0) {
        return Err(AppError::Validation(
            "Quantidade de itens deve ser positiva.".into(),
        ));
    }

    let total = order_total(&payload.items);

    let txn = state.orm.begin().await?;

    let table = Tables::find_by_id(payload.mesa_id).one(&txn).await?;
    let table = match table {
        Some(t) => t,
        None => return Err(AppError::NotFound("Mesa não encontrada.".into())),
    };

    let order = OrderActive {
        id: NotSet,
        table_id: Set(table.id),
        user_id: Set(user.user_id),
        status: Set(OrderStatus::Pending),
        total: Set(total),
        created_at: NotSet,
        updated_at: NotSet,
        ready_at: Set(None),
        closed_at: Set(None),
    }
    .insert(&txn)
    .await?;

    for item in &payload.items {
        OrderItemActive {
            id: NotSet,
            order_id: Set(order.id),
            product_id: Set(item.product_id),
            quantity: Set(item.quantity),
            price: Set(item.price),
        }
        .insert(&txn)
        .await?;
    }

    let mut active: TableActive = table.into();
    active.status = Set(TableStatus::Occupied);
    active.update(&txn).await?;

    txn.commit().await?;

    tracing::info!(order_id = order.id, table_id = order.table_id, "order created");

    Ok(order.id)
}

/// The total is always recomputed server-side from the submitted lines,
/// regardless of anything the client claims.
pub fn order_total(items: &[OrderItemRequest]) -> Decimal {
    items
        .iter()
        .map(|item| item.price * Decimal::from(item.quantity))
        .sum()
}

/// Kitchen action: flip an order to READY and stamp the time.
pub async fn mark_ready(state: &AppState, id: i32) -> AppResult<Order> {
    let existing = Orders::find_by_id(id).one(&state.orm).await?;
    let existing = match existing {
        Some(o) => o,
        None => {
            return Err(AppError::NotFound(format!(
                "Pedido #{id} não encontrado no sistema."
            )));
        }
    };

    let now = Utc::now();
    let mut active: OrderActive = existing.into();
    active.status = Set(OrderStatus::Ready);
    active.ready_at = Set(Some(now.into()));
    active.updated_at = Set(now.into());
    let order = active.update(&state.orm).await?;

    Ok(order_from_entity(order))
}

/// The kitchen queue: PENDING orders oldest-first, with table numbers and
/// product names resolved.
pub async fn list_pending(state: &AppState) -> AppResult<Vec<KitchenOrder>> {
    let orders = Orders::find()
        .filter(OrderCol::Status.eq(OrderStatus::Pending))
        .order_by_asc(OrderCol::CreatedAt)
        .all(&state.orm)
        .await?;

    if orders.is_empty() {
        return Ok(Vec::new());
    }

    let table_numbers = table_numbers_for(state, &orders).await?;

    let order_ids: Vec<i32> = orders.iter().map(|o| o.id).collect();
    let lines = OrderItems::find()
        .filter(OrderItemCol::OrderId.is_in(order_ids))
        .find_also_related(Products)
        .all(&state.orm)
        .await?;

    let mut items_by_order: HashMap<i32, Vec<KitchenItem>> = HashMap::new();
    for (item, product) in lines {
        let name = product.map(|p| p.name).unwrap_or_default();
        items_by_order
            .entry(item.order_id)
            .or_default()
            .push(KitchenItem {
                name,
                quantity: item.quantity,
            });
    }

    Ok(orders
        .into_iter()
        .map(|order| KitchenOrder {
            id: order.id,
            mesa: table_numbers.get(&order.table_id).copied().unwrap_or_default(),
            created_at: order.created_at.with_timezone(&Utc),
            total: order.total,
            status: order.status,
            itens: items_by_order.remove(&order.id).unwrap_or_default(),
        })
        .collect())
}

/// Sales report: CLOSED orders, most recently updated first.
pub async fn list_closed(state: &AppState) -> AppResult<Vec<ClosedOrder>> {
    let orders = Orders::find()
        .filter(OrderCol::Status.eq(OrderStatus::Closed))
        .order_by_desc(OrderCol::UpdatedAt)
        .all(&state.orm)
        .await?;

    if orders.is_empty() {
        return Ok(Vec::new());
    }

    let table_numbers = table_numbers_for(state, &orders).await?;

    let user_ids: Vec<i32> = orders.iter().map(|o| o.user_id).collect();
    let user_names: HashMap<i32, String> = Users::find()
        .filter(UserCol::Id.is_in(user_ids))
        .all(&state.orm)
        .await?
        .into_iter()
        .map(|u| (u.id, u.name))
        .collect();

    Ok(orders
        .into_iter()
        .map(|order| ClosedOrder {
            id: order.id,
            table_number: table_numbers.get(&order.table_id).copied().unwrap_or_default(),
            total: order.total,
            user_name: user_names.get(&order.user_id).cloned().unwrap_or_default(),
            // Orders closed before the column existed carry no stamp.
            closed_at: order
                .closed_at
                .unwrap_or(order.created_at)
                .with_timezone(&Utc),
        })
        .collect())
}

/// Consolidated bill for a table: every non-CLOSED order, oldest first,
/// aggregated by the billing module.
pub async fn table_bill(state: &AppState, table_id: i32) -> AppResult<ConsolidatedBill> {
    let orders = Orders::find()
        .filter(OrderCol::TableId.eq(table_id))
        .filter(OrderCol::Status.ne(OrderStatus::Closed))
        .order_by_asc(OrderCol::CreatedAt)
        .find_also_related(Users)
        .all(&state.orm)
        .await?;

    let order_ids: Vec<i32> = orders.iter().map(|(o, _)| o.id).collect();
    let lines = OrderItems::find()
        .filter(OrderItemCol::OrderId.is_in(order_ids))
        .find_also_related(Products)
        .all(&state.orm)
        .await?;

    let mut lines_by_order: HashMap<i32, Vec<BillLine>> = HashMap::new();
    for (item, product) in lines {
        let product_name = product.map(|p| p.name).unwrap_or_default();
        lines_by_order
            .entry(item.order_id)
            .or_default()
            .push(BillLine {
                product_id: item.product_id,
                product_name,
                quantity: item.quantity,
                price: item.price,
            });
    }

    let open_orders: Vec<OpenOrder> = orders
        .into_iter()
        .map(|(order, user)| OpenOrder {
            garcom: user.map(|u| u.name).unwrap_or_default(),
            lines: lines_by_order.remove(&order.id).unwrap_or_default(),
            order,
        })
        .collect();

    Ok(billing::consolidate(table_id, &open_orders))
}

async fn table_numbers_for(
    state: &AppState,
    orders: &[OrderModel],
) -> AppResult<HashMap<i32, i32>> {
    let table_ids: Vec<i32> = orders.iter().map(|o| o.table_id).collect();
    Ok(Tables::find()
        .filter(TableCol::Id.is_in(table_ids))
        .all(&state.orm)
        .await?
        .into_iter()
        .map(|t| (t.id, t.number))
        .collect())
}

fn order_from_entity(model: OrderModel) -> Order {
    Order {
        id: model.id,
        table_id: model.table_id,
        user_id: model.user_id,
        status: model.status,
        total: model.total,
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
        ready_at: model.ready_at.map(|dt| dt.with_timezone(&Utc)),
        closed_at: model.closed_at.map(|dt| dt.with_timezone(&Utc)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_total_sums_price_times_quantity() {
        let items = vec![
            OrderItemRequest {
                product_id: 1,
                quantity: 2,
                price: Decimal::new(300, 2),
            },
            OrderItemRequest {
                product_id: 2,
                quantity: 1,
                price: Decimal::new(700, 2),
            },
        ];
        assert_eq!(order_total(&items), Decimal::new(1300, 2));
    }

    #[test]
    fn order_total_of_no_items_is_zero() {
        assert_eq!(order_total(&[]), Decimal::ZERO);
    }
}
