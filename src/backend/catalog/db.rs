/**
 * Product Database Operations
 *
 * CRUD over the `products` table. Callers validate payloads before they get
 * here; these functions only translate to SQL.
 */

use sqlx::PgPool;

use crate::shared::{Product, ProductPayload};

const PRODUCT_COLUMNS: &str = "id, name, price, description, category, image_url, stock";

#[derive(sqlx::FromRow)]
struct ProductRow {
    id: i64,
    name: String,
    price: f64,
    description: Option<String>,
    category: Option<String>,
    image_url: Option<String>,
    stock: i32,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            price: row.price,
            description: row.description,
            category: row.category,
            image_url: row.image_url,
            stock: row.stock,
        }
    }
}

/// All products ordered by id
pub async fn list_products(pool: &PgPool) -> Result<Vec<Product>, sqlx::Error> {
    let rows = sqlx::query_as::<_, ProductRow>(&format!(
        "SELECT {} FROM products ORDER BY id",
        PRODUCT_COLUMNS
    ))
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(Product::from).collect())
}

pub async fn insert_product(pool: &PgPool, payload: &ProductPayload) -> Result<Product, sqlx::Error> {
    let row = sqlx::query_as::<_, ProductRow>(&format!(
        r#"
        INSERT INTO products (name, price, description, category, image_url, stock)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING {}
        "#,
        PRODUCT_COLUMNS
    ))
    .bind(payload.name.trim())
    .bind(payload.price)
    .bind(&payload.description)
    .bind(&payload.category)
    .bind(&payload.image_url)
    .bind(payload.stock.unwrap_or(0))
    .fetch_one(pool)
    .await?;

    Ok(row.into())
}

/// Replace a product's fields
///
/// `category` and `stock` keep their stored value when the payload omits
/// them. Returns `None` if no product has this id.
pub async fn update_product(
    pool: &PgPool,
    id: i64,
    payload: &ProductPayload,
) -> Result<Option<Product>, sqlx::Error> {
    let row = sqlx::query_as::<_, ProductRow>(&format!(
        r#"
        UPDATE products
        SET name = $1,
            price = $2,
            description = $3,
            image_url = $4,
            category = COALESCE($5, category),
            stock = COALESCE($6, stock)
        WHERE id = $7
        RETURNING {}
        "#,
        PRODUCT_COLUMNS
    ))
    .bind(payload.name.trim())
    .bind(payload.price)
    .bind(&payload.description)
    .bind(&payload.image_url)
    .bind(&payload.category)
    .bind(payload.stock)
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(Product::from))
}

/// Returns `true` if a product was deleted
pub async fn delete_product(pool: &PgPool, id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM products WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn count_products(pool: &PgPool) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM products")
        .fetch_one(pool)
        .await
}
