use oncomanda_api::{config::AppConfig, db::create_pool};
use rust_decimal::Decimal;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let pool = create_pool(&config.database_url).await?;
    // Ensure migrations are applied.
    sqlx::migrate!("./migrations").run(&pool).await?;

    seed_users(&pool).await?;
    seed_tables(&pool).await?;
    seed_products(&pool).await?;

    println!("Seed completed.");
    Ok(())
}

// The principal waiter must be the first row so it gets id 1.
async fn seed_users(pool: &sqlx::PgPool) -> anyhow::Result<()> {
    sqlx::query(
        r#"
        INSERT INTO users (username, password, name, role)
        VALUES ($1, $2, $3, $4)
        ON CONFLICT (username) DO NOTHING
        "#,
    )
    .bind("garcom1")
    .bind("123456")
    .bind("João Garçom")
    .bind("GARCOM")
    .execute(pool)
    .await?;

    println!("Ensured user garcom1");
    Ok(())
}

async fn seed_tables(pool: &sqlx::PgPool) -> anyhow::Result<()> {
    for number in 1..=3 {
        sqlx::query(
            r#"
            INSERT INTO tables (number)
            VALUES ($1)
            ON CONFLICT (number) DO NOTHING
            "#,
        )
        .bind(number)
        .execute(pool)
        .await?;
    }

    println!("Seeded tables 1-3");
    Ok(())
}

async fn seed_products(pool: &sqlx::PgPool) -> anyhow::Result<()> {
    let products = vec![
        ("Hambúrguer", Decimal::new(2500, 2)),
        ("Coca-cola", Decimal::new(700, 2)),
        ("Água", Decimal::new(300, 2)),
    ];

    for (name, price) in products {
        // Product names are not unique in the schema; guard by hand.
        sqlx::query(
            r#"
            INSERT INTO products (name, price)
            SELECT $1, $2
            WHERE NOT EXISTS (SELECT 1 FROM products WHERE name = $1)
            "#,
        )
        .bind(name)
        .bind(price)
        .execute(pool)
        .await?;
    }

    println!("Seeded products");
    Ok(())
}
