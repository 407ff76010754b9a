//! Integration tests for the entry and category repositories.

mod common;

use chrono::NaiveDate;
use rust_decimal_macros::dec;
use uuid::Uuid;

use moneta_core::category::CategoryRepository as _;
use moneta_core::entry::{
    Entry, EntryFilter, EntryRepository as _, EntryService, EntryStatus, EntryType,
};
use moneta_core::user::{NewUser, User, UserRepository as _};
use moneta_db::{CategoryRepository, EntryRepository, UserRepository};
use moneta_shared::types::{EntryId, UserId};

async fn user(repo: &UserRepository) -> User {
    repo.create(NewUser {
        name: "Ledger".to_string(),
        email: format!("ledger-{}@example.com", Uuid::new_v4()),
        password_hash: "$argon2id$test_hash".to_string(),
    })
    .await
    .expect("Failed to create user")
}

fn entry(user_id: UserId, description: &str, entry_type: EntryType, status: EntryStatus) -> Entry {
    Entry {
        id: EntryId::new(),
        description: description.to_string(),
        month: 6,
        year: 2024,
        amount: dec!(100.00),
        entry_type,
        status,
        latitude: Some(dec!(-23.550520)),
        longitude: None,
        category_id: None,
        user_id,
        registered_on: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
    }
}

#[tokio::test]
#[ignore = "requires a running Postgres (DATABASE_URL)"]
async fn test_insert_many_preserves_order() {
    let db = common::setup().await;
    let owner = user(&UserRepository::new(db.clone())).await;
    let repo = EntryRepository::new(db);

    let batch = vec![
        entry(owner.id, "First", EntryType::Income, EntryStatus::Pending),
        entry(owner.id, "Second", EntryType::Expense, EntryStatus::Pending),
        entry(owner.id, "Third", EntryType::Expense, EntryStatus::Pending),
    ];
    let stored = repo.insert_many(batch.clone()).await.expect("Failed to insert batch");

    assert_eq!(stored, batch);
    let found = repo.search(&EntryFilter::for_user(owner.id)).await.unwrap();
    assert_eq!(found.len(), 3);
}

#[tokio::test]
#[ignore = "requires a running Postgres (DATABASE_URL)"]
async fn test_search_description_is_case_insensitive() {
    let db = common::setup().await;
    let owner = user(&UserRepository::new(db.clone())).await;
    let repo = EntryRepository::new(db);

    repo.insert(entry(owner.id, "Monthly RENT", EntryType::Expense, EntryStatus::Pending))
        .await
        .unwrap();
    repo.insert(entry(owner.id, "Groceries", EntryType::Expense, EntryStatus::Pending))
        .await
        .unwrap();

    let filter = EntryFilter {
        description: Some("rent".to_string()),
        ..EntryFilter::for_user(owner.id)
    };
    let found = repo.search(&filter).await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].description, "Monthly RENT");
}

#[tokio::test]
#[ignore = "requires a running Postgres (DATABASE_URL)"]
async fn test_settled_sum_and_balance() {
    let db = common::setup().await;
    let users = std::sync::Arc::new(UserRepository::new(db.clone()));
    let owner = user(&users).await;
    let entries = std::sync::Arc::new(EntryRepository::new(db.clone()));

    assert_eq!(entries.settled_sum(owner.id, EntryType::Income).await.unwrap(), None);

    let mut income = entry(owner.id, "Salary", EntryType::Income, EntryStatus::Settled);
    income.amount = dec!(500.00);
    let mut expense = entry(owner.id, "Rent", EntryType::Expense, EntryStatus::Settled);
    expense.amount = dec!(120.40);
    let pending = entry(owner.id, "Later", EntryType::Expense, EntryStatus::Pending);
    entries.insert_many(vec![income, expense, pending]).await.unwrap();

    let service = EntryService::new(
        entries,
        users,
        std::sync::Arc::new(CategoryRepository::new(db)),
    );
    assert_eq!(service.balance(owner.id).await.unwrap(), dec!(379.60));
}

#[tokio::test]
#[ignore = "requires a running Postgres (DATABASE_URL)"]
async fn test_update_and_delete() {
    let db = common::setup().await;
    let owner = user(&UserRepository::new(db.clone())).await;
    let repo = EntryRepository::new(db);

    let mut stored = repo
        .insert(entry(owner.id, "Rent", EntryType::Expense, EntryStatus::Pending))
        .await
        .unwrap();
    stored.status = EntryStatus::Settled;
    let updated = repo.update(stored.clone()).await.unwrap();
    assert_eq!(updated.status, EntryStatus::Settled);

    assert!(repo.delete(stored.id).await.unwrap());
    assert!(!repo.delete(stored.id).await.unwrap());
    assert!(repo.find_by_id(stored.id).await.unwrap().is_none());
}

#[tokio::test]
#[ignore = "requires a running Postgres (DATABASE_URL)"]
async fn test_category_create_and_lookup() {
    let repo = CategoryRepository::new(common::setup().await);
    let description = format!("Category {}", Uuid::new_v4());

    let created = repo.create(&description).await.unwrap();
    let found = repo.find_by_description(&description).await.unwrap();
    assert_eq!(found, Some(created.clone()));
    assert!(repo.list().await.unwrap().contains(&created));
}
