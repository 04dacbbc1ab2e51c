//! End-to-end service flow against a real Postgres database.
//!
//! Runs only when `TEST_DATABASE_URL` (or `DATABASE_URL`) is set; the
//! database is truncated at the start of the test.

use oncomanda_api::{
    db::{create_orm_conn, create_pool},
    dto::{
        auth::LoginRequest,
        orders::{CreateOrderRequest, OrderItemRequest},
        products::CreateProductRequest,
        tables::CreateTableRequest,
        users::CreateUserRequest,
    },
    error::AppError,
    middleware::auth::AuthUser,
    models::{OrderStatus, Role, TableStatus},
    services::{auth_service, order_service, product_service, table_service, user_service},
    state::AppState,
};
use rust_decimal::Decimal;

fn database_url() -> Option<String> {
    std::env::var("TEST_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .ok()
}

async fn setup_state(url: &str) -> AppState {
    let pool = create_pool(url).await.unwrap();
    sqlx::migrate!("./migrations").run(&pool).await.unwrap();
    sqlx::query("TRUNCATE order_items, orders, tables, products, users RESTART IDENTITY CASCADE")
        .execute(&pool)
        .await
        .unwrap();
    let orm = create_orm_conn(url).await.unwrap();
    AppState { pool, orm }
}

#[tokio::test]
async fn full_table_lifecycle() {
    let Some(url) = database_url() else {
        eprintln!("skipping: TEST_DATABASE_URL not set");
        return;
    };
    let state = setup_state(&url).await;

    // Seed a waiter; first row gets id 1 and becomes the principal account.
    let waiter = user_service::create_user(
        &state,
        CreateUserRequest {
            username: "garcom1".into(),
            password: "123456".into(),
            name: "João Garçom".into(),
            role: Some(Role::Garcom),
        },
    )
    .await
    .unwrap();
    assert_eq!(waiter.id, 1);

    let auth = AuthUser {
        user_id: waiter.id,
        name: waiter.name.clone(),
        role: Role::Garcom,
    };

    let water = product_service::create_product(
        &state.pool,
        CreateProductRequest {
            name: "Água".into(),
            price: Decimal::new(300, 2),
            available: None,
        },
    )
    .await
    .unwrap();
    assert!(water.available);

    let (_, table) = table_service::create_table(&state, CreateTableRequest { number: 1 })
        .await
        .unwrap();
    assert_eq!(table.status, TableStatus::Free);

    // Duplicate numbers conflict; non-positive numbers are rejected.
    let dup = table_service::create_table(&state, CreateTableRequest { number: 1 }).await;
    assert!(matches!(dup, Err(AppError::Conflict(_))));
    let bad = table_service::create_table(&state, CreateTableRequest { number: 0 }).await;
    assert!(matches!(bad, Err(AppError::Validation(_))));

    // The reservation toggle is its own inverse on a free table.
    let (_, reserved) = table_service::toggle_reservation(&state, table.id).await.unwrap();
    assert_eq!(reserved.status, TableStatus::Reserved);
    let (_, freed) = table_service::toggle_reservation(&state, table.id).await.unwrap();
    assert_eq!(freed.status, TableStatus::Free);

    // First order occupies the table.
    let order_a = order_service::create_order(
        &state,
        &auth,
        CreateOrderRequest {
            mesa_id: table.id,
            user_id: None,
            items: vec![OrderItemRequest {
                product_id: water.id,
                quantity: 2,
                price: Decimal::new(300, 2),
            }],
        },
    )
    .await
    .unwrap();

    let tables = table_service::list_tables(&state).await.unwrap();
    assert_eq!(tables[0].status, TableStatus::Occupied);

    let occupied = table_service::toggle_reservation(&state, table.id).await;
    assert!(matches!(occupied, Err(AppError::Validation(_))));

    let bill = order_service::table_bill(&state, table.id).await.unwrap();
    assert_eq!(bill.total, Decimal::new(600, 2));
    assert_eq!(bill.items.len(), 1);
    assert_eq!(bill.items[0].quantity, 2);
    assert_eq!(bill.individual_orders.len(), 1);
    assert_eq!(bill.individual_orders[0].garcom, "João Garçom");

    // Second order for the same table merges into the same bill line.
    let order_b = order_service::create_order(
        &state,
        &auth,
        CreateOrderRequest {
            mesa_id: table.id,
            user_id: None,
            items: vec![OrderItemRequest {
                product_id: water.id,
                quantity: 1,
                price: Decimal::new(300, 2),
            }],
        },
    )
    .await
    .unwrap();

    let bill = order_service::table_bill(&state, table.id).await.unwrap();
    assert_eq!(bill.total, Decimal::new(900, 2));
    assert_eq!(bill.items.len(), 1);
    assert_eq!(bill.items[0].quantity, 3);
    assert_eq!(bill.items[0].name, "Água");

    // Kitchen queue is oldest-first and only lists PENDING orders.
    let pending = order_service::list_pending(&state).await.unwrap();
    assert_eq!(pending.len(), 2);
    assert_eq!(pending[0].id, order_a);
    assert_eq!(pending[1].id, order_b);
    assert_eq!(pending[0].mesa, 1);
    assert_eq!(pending[0].itens[0].name, "Água");

    let ready = order_service::mark_ready(&state, order_a).await.unwrap();
    assert_eq!(ready.status, OrderStatus::Ready);
    assert!(ready.ready_at.is_some());

    let pending = order_service::list_pending(&state).await.unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].id, order_b);

    // A READY order still belongs on the bill.
    let bill = order_service::table_bill(&state, table.id).await.unwrap();
    assert_eq!(bill.total, Decimal::new(900, 2));

    let missing = order_service::mark_ready(&state, 9999).await;
    assert!(matches!(missing, Err(AppError::NotFound(_))));

    // Closing the table frees it and closes every open order.
    table_service::close_table(&state, table.id).await.unwrap();
    let tables = table_service::list_tables(&state).await.unwrap();
    assert_eq!(tables[0].status, TableStatus::Free);

    let bill = order_service::table_bill(&state, table.id).await.unwrap();
    assert_eq!(bill.total, Decimal::ZERO);
    assert!(bill.items.is_empty());

    let closed = order_service::list_closed(&state).await.unwrap();
    assert_eq!(closed.len(), 2);
    assert_eq!(closed[0].user_name, "João Garçom");
    assert_eq!(closed[0].table_number, 1);

    // Closing an already-free table is a no-op, not an error.
    table_service::close_table(&state, table.id).await.unwrap();

    // The principal user and users with orders cannot be deleted.
    let principal = user_service::delete_user(&state, 1).await;
    assert!(matches!(principal, Err(AppError::Conflict(_))));

    let maria = user_service::create_user(
        &state,
        CreateUserRequest {
            username: "maria".into(),
            password: "senha".into(),
            name: "Maria".into(),
            role: None,
        },
    )
    .await
    .unwrap();
    assert_eq!(maria.role, Role::Garcom);
    user_service::delete_user(&state, maria.id).await.unwrap();

    // Login round-trip.
    let login = auth_service::login_user(
        &state,
        LoginRequest {
            username: "garcom1".into(),
            password: "123456".into(),
        },
    )
    .await
    .unwrap();
    assert!(!login.token.is_empty());
    assert_eq!(login.user.name, "João Garçom");

    let wrong = auth_service::login_user(
        &state,
        LoginRequest {
            username: "garcom1".into(),
            password: "errada".into(),
        },
    )
    .await;
    assert!(matches!(wrong, Err(AppError::Auth(_))));
}
