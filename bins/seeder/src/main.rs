//! Database seeder for Moneta development.
//!
//! Seeds the default categories and a demo user. Safe to run repeatedly.
//!
//! Usage: cargo run --bin seeder

use anyhow::Context;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use moneta_core::user::hash_password;
use moneta_db::entities::{categories, users};

/// Categories every fresh database starts with.
const DEFAULT_CATEGORIES: [&str; 5] = ["Alimentação", "Moradia", "Transporte", "Lazer", "Salário"];

const DEMO_NAME: &str = "Demo User";
const DEMO_EMAIL: &str = "demo@moneta.dev";
const DEMO_PASSWORD: &str = "demo-password";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let database_url =
        std::env::var("DATABASE_URL").context("DATABASE_URL must be set in environment")?;

    println!("Connecting to database...");
    let db = moneta_db::connect(&database_url, 2, 1)
        .await
        .context("Failed to connect to database")?;

    println!("Seeding categories...");
    seed_categories(&db).await?;

    println!("Seeding demo user...");
    seed_demo_user(&db).await?;

    println!("Seeding complete!");
    Ok(())
}

async fn seed_categories(db: &DatabaseConnection) -> anyhow::Result<()> {
    for description in DEFAULT_CATEGORIES {
        let existing = categories::Entity::find()
            .filter(categories::Column::Description.eq(description))
            .one(db)
            .await?;
        if existing.is_some() {
            println!("  {description} already exists, skipping...");
            continue;
        }

        categories::ActiveModel {
            id: Set(Uuid::now_v7()),
            description: Set(description.to_string()),
        }
        .insert(db)
        .await
        .with_context(|| format!("Failed to insert category {description}"))?;
        println!("  Created {description}");
    }
    Ok(())
}

async fn seed_demo_user(db: &DatabaseConnection) -> anyhow::Result<()> {
    let existing = users::Entity::find()
        .filter(users::Column::Email.eq(DEMO_EMAIL))
        .one(db)
        .await?;
    if existing.is_some() {
        println!("  Demo user already exists, skipping...");
        return Ok(());
    }

    let password_hash = hash_password(DEMO_PASSWORD)?;
    users::ActiveModel {
        id: Set(Uuid::now_v7()),
        name: Set(DEMO_NAME.to_string()),
        email: Set(DEMO_EMAIL.to_string()),
        password_hash: Set(password_hash),
        created_at: Set(Utc::now().into()),
    }
    .insert(db)
    .await
    .context("Failed to insert demo user")?;

    println!("  Created {DEMO_EMAIL} (password: {DEMO_PASSWORD})");
    Ok(())
}
