//! Seed the menu and reviews with sample data.

use rust_decimal::Decimal;
use secrecy::ExposeSecret;
use sqlx::PgPool;

use super::{CommandError, database_url};

/// name, category, description, price
const MENU: &[(&str, &str, &str, &str)] = &[
    (
        "Roast Duck Breast",
        "offered",
        "Pan-seared duck breast with roasted root vegetables",
        "14.50",
    ),
    (
        "Tuna Niçoise",
        "salad",
        "Seared tuna, green beans, olives, and soft egg",
        "11.50",
    ),
    (
        "Escalope de Veau",
        "offered",
        "Veal escalope with lemon butter and capers",
        "12.50",
    ),
    (
        "Chicken and Walnut Salad",
        "salad",
        "Roast chicken, walnuts, and grapes on baby greens",
        "10.00",
    ),
    (
        "Fish Parmentier",
        "offered",
        "White fish baked under a potato crust",
        "12.00",
    ),
    (
        "Crème Brûlée",
        "dessert",
        "Classic vanilla custard with a caramelized top",
        "6.50",
    ),
    (
        "Tarte Tatin",
        "dessert",
        "Upside-down caramelized apple tart",
        "7.00",
    ),
    (
        "Fresh Lime Soda",
        "drinks",
        "House-made lime soda, sweet or salted",
        "3.50",
    ),
];

/// reviewer, details, rating
const REVIEWS: &[(&str, &str, i32)] = &[
    (
        "Marcel D.",
        "The duck was perfect and the service warm. Coming back next week.",
        5,
    ),
    (
        "Priya S.",
        "Great salads, reasonable prices. The lime soda is a must.",
        4,
    ),
    (
        "Jon A.",
        "Solid bistro fare. Dessert selection could be bigger.",
        4,
    ),
];

/// Insert sample menu items and reviews.
///
/// A no-op when the menu table already has rows, so re-running is safe.
///
/// # Errors
///
/// Returns an error if the database URL is missing, the connection fails,
/// or an insert fails.
pub async fn run() -> Result<(), CommandError> {
    let database_url = database_url()?;

    tracing::info!("Connecting to database...");
    let pool = PgPool::connect(database_url.expose_secret()).await?;

    let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM menu_items")
        .fetch_one(&pool)
        .await?;
    if existing > 0 {
        tracing::info!(existing, "menu already seeded, skipping");
        return Ok(());
    }

    for (name, category, description, price) in MENU {
        let price: Decimal = price.parse().map_err(|_| {
            sqlx::Error::Protocol(format!("invalid seed price for {name}"))
        })?;

        sqlx::query(
            r"
            INSERT INTO menu_items (name, category, description, price)
            VALUES ($1, $2, $3, $4)
            ",
        )
        .bind(name)
        .bind(category)
        .bind(description)
        .bind(price)
        .execute(&pool)
        .await?;
    }
    tracing::info!(items = MENU.len(), "menu seeded");

    for (reviewer, details, rating) in REVIEWS {
        sqlx::query(
            r"
            INSERT INTO reviews (name, details, rating)
            VALUES ($1, $2, $3)
            ",
        )
        .bind(reviewer)
        .bind(details)
        .bind(rating)
        .execute(&pool)
        .await?;
    }
    tracing::info!(reviews = REVIEWS.len(), "reviews seeded");

    Ok(())
}
