/**
 * Demo Data Seeding
 *
 * Fills empty tables on startup so that a fresh database has an admin
 * account, a regular account and a few products. Tables that already hold
 * rows are left alone.
 */

use bcrypt::{hash, DEFAULT_COST};
use sqlx::PgPool;

use crate::backend::auth::users::{count_users, create_user, ROLE_ADMIN, ROLE_USER};
use crate::backend::catalog::db::{count_products, insert_product};
use crate::backend::error::BackendError;
use crate::shared::ProductPayload;

/// (username, password, role, email)
const SEED_USERS: [(&str, &str, &str, &str); 2] = [
    ("admin", "admin123", ROLE_ADMIN, "admin@reactshop.hu"),
    ("user", "user123", ROLE_USER, "user@reactshop.hu"),
];

/// Demo catalog
pub fn seed_products() -> Vec<ProductPayload> {
    vec![
        ProductPayload {
            name: "Gaming Mouse".to_string(),
            price: 15000.0,
            description: Some("Optical sensor, RGB lighting".to_string()),
            category: Some("Peripherals".to_string()),
            image_url: Some(
                "https://images.unsplash.com/photo-1527443224154-c4a3942d3acf?w=500".to_string(),
            ),
            stock: Some(50),
        },
        ProductPayload {
            name: "Mechanical Keyboard".to_string(),
            price: 35000.0,
            description: Some("Blue switches, full size layout".to_string()),
            category: Some("Peripherals".to_string()),
            image_url: Some(
                "https://images.unsplash.com/photo-1511467687858-23d96c32e4ae?w=500".to_string(),
            ),
            stock: Some(20),
        },
        ProductPayload {
            name: "Gaming Monitor".to_string(),
            price: 85000.0,
            description: Some("27 inch, 144Hz, 1ms response time".to_string()),
            category: Some("Monitors".to_string()),
            image_url: Some(
                "https://images.unsplash.com/photo-1527443224154-c4a3942d3acf?w=500".to_string(),
            ),
            stock: Some(10),
        },
    ]
}

/// Seed users and products into empty tables
///
/// # Errors
///
/// Returns the first database or hashing error. Rows inserted before the
/// failure stay in place.
pub async fn seed_database(pool: &PgPool) -> Result<(), BackendError> {
    if count_users(pool).await? == 0 {
        for (username, password, role, email) in SEED_USERS {
            let password_hash = hash(password, DEFAULT_COST)?;
            create_user(pool, username, email, &password_hash, role).await?;
        }
        tracing::info!("Seeded users: admin, user");
    }

    if count_products(pool).await? == 0 {
        let products = seed_products();
        for product in &products {
            insert_product(pool, product).await?;
        }
        tracing::info!("Seeded {} products", products.len());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_products_are_valid() {
        let products = seed_products();
        assert_eq!(products.len(), 3);
        assert!(products.iter().all(|p| p.validate().is_ok()));
    }

    #[test]
    fn test_seed_users_include_one_admin() {
        let admins = SEED_USERS.iter().filter(|(_, _, role, _)| *role == ROLE_ADMIN).count();
        assert_eq!(admins, 1);
    }
}
