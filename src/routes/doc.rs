use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        MessageResponse,
        auth::{LoginRequest, LoginResponse, LoginUser},
        orders::{
            ClosedOrder, ConsolidatedBill, ConsolidatedItem, CreateOrderRequest,
            CreateOrderResponse, IndividualOrder, KitchenItem, KitchenOrder, OrderItemRequest,
            ReadyResponse,
        },
        products::{CreateProductRequest, ProductMessage},
        tables::{CreateTableRequest, TableMessage},
        users::{CreateUserRequest, UpdateUserRequest, UserMessage},
    },
    models::{Order, OrderStatus, Product, Role, Table, TableStatus, UserProfile},
    routes::{auth, health, orders, products, tables, users},
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        auth::login,
        tables::list_tables,
        tables::create_table,
        tables::toggle_reservation,
        tables::close_table,
        tables::table_bill,
        products::list_products,
        products::create_product,
        orders::create_order,
        orders::list_pending,
        orders::list_closed,
        orders::mark_ready,
        users::create_user,
        users::list_users,
        users::update_user,
        users::delete_user,
    ),
    components(
        schemas(
            Table,
            TableStatus,
            Product,
            Order,
            OrderStatus,
            Role,
            UserProfile,
            LoginRequest,
            LoginResponse,
            LoginUser,
            CreateTableRequest,
            TableMessage,
            CreateProductRequest,
            ProductMessage,
            CreateOrderRequest,
            OrderItemRequest,
            CreateOrderResponse,
            KitchenOrder,
            KitchenItem,
            ReadyResponse,
            ClosedOrder,
            ConsolidatedBill,
            ConsolidatedItem,
            IndividualOrder,
            CreateUserRequest,
            UpdateUserRequest,
            UserMessage,
            MessageResponse,
        )
    ),
    security(
        ("bearer_auth" = [])
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Auth", description = "Authentication endpoints"),
        (name = "Tables", description = "Table lifecycle and consolidated bill"),
        (name = "Products", description = "Product catalog"),
        (name = "Orders", description = "Order ledger and kitchen queue"),
        (name = "Users", description = "User management"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
