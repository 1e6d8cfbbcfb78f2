//! Demo data seeding for first launch.
//!
//! Seeds a small catalog and three users, but only into collections that
//! are still empty, so it is safe to run on every startup.

use tracing::info;

use lunchbox_core::{Email, ItemId, Price, UserId};

use crate::db::ObjectStore;
use crate::error::AppError;
use crate::models::{LunchItem, User};

/// The demo catalog.
#[must_use]
pub fn demo_lunch_items() -> Vec<LunchItem> {
    let catalog: [(&str, &str, u32, &str, &str); 6] = [
        (
            "1",
            "Caesar Salad",
            1299,
            "Fresh romaine lettuce with parmesan and croutons",
            "Salads",
        ),
        (
            "2",
            "Grilled Chicken Sandwich",
            1599,
            "Juicy grilled chicken with avocado and bacon",
            "Sandwiches",
        ),
        (
            "3",
            "Margherita Pizza",
            1899,
            "Classic pizza with fresh mozzarella and basil",
            "Pizza",
        ),
        (
            "4",
            "Beef Burger",
            1699,
            "Angus beef patty with cheese and fries",
            "Burgers",
        ),
        (
            "5",
            "Pasta Carbonara",
            1499,
            "Creamy pasta with pancetta and parmesan",
            "Pasta",
        ),
        (
            "6",
            "Fish & Chips",
            1799,
            "Beer-battered fish with crispy fries",
            "Mains",
        ),
    ];

    catalog
        .into_iter()
        .map(|(id, name, cents, description, category)| LunchItem {
            id: ItemId::new(id),
            name: name.to_owned(),
            price: Price::from_cents(cents),
            description: Some(description.to_owned()),
            category: Some(category.to_owned()),
            available: true,
        })
        .collect()
}

/// The demo users: one admin, two regulars.
#[must_use]
pub fn demo_users() -> Vec<User> {
    let roster: [(&str, &str, &str, bool); 3] = [
        ("admin-1", "Admin User", "admin@company.com", true),
        ("user-1", "John Doe", "john.doe@company.com", false),
        ("user-2", "Jane Smith", "jane.smith@company.com", false),
    ];

    roster
        .into_iter()
        .filter_map(|(id, name, email, is_admin)| {
            let email = Email::parse(email).ok()?;
            Some(User {
                id: UserId::new(id),
                name: name.to_owned(),
                email,
                is_admin,
            })
        })
        .collect()
}

/// Seed the demo catalog and users into empty collections.
///
/// # Errors
///
/// Returns `AppError::Store` if a read or write fails.
pub async fn seed_demo_data(store: &ObjectStore) -> Result<(), AppError> {
    let items = store.items();
    if items.list().await?.is_empty() {
        for item in demo_lunch_items() {
            items.put(&item).await?;
        }
        info!("seeded demo lunch items");
    }

    let users = store.users();
    if users.list().await?.is_empty() {
        for user in demo_users() {
            users.put(&user).await?;
        }
        info!("seeded demo users");
    }

    Ok(())
}
