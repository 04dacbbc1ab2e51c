use rust_decimal::Decimal;

use crate::{
    db::DbPool,
    dto::products::CreateProductRequest,
    error::{AppError, AppResult},
    models::Product,
};

pub async fn list_products(pool: &DbPool) -> AppResult<Vec<Product>> {
    let items = sqlx::query_as::<_, Product>(
        "SELECT id, name, price, available, created_at FROM products ORDER BY id",
    )
    .fetch_all(pool)
    .await?;
    Ok(items)
}

pub async fn create_product(
    pool: &DbPool,
    payload: CreateProductRequest,
) -> AppResult<Product> {
    if payload.name.trim().is_empty() || payload.price <= Decimal::ZERO {
        return Err(AppError::Validation(
            "Nome e preço (válido) são obrigatórios.".into(),
        ));
    }

    let product = sqlx::query_as::<_, Product>(
        "INSERT INTO products (name, price, available) VALUES ($1, $2, $3) \
         RETURNING id, name, price, available, created_at",
    )
    .bind(payload.name)
    .bind(payload.price)
    .bind(payload.available.unwrap_or(true))
    .fetch_one(pool)
    .await?;

    Ok(product)
}
