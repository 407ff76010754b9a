//! Initial schema: users, categories and entries.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(SCHEMA_SQL).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(
            "DROP TABLE IF EXISTS entries CASCADE;
             DROP TABLE IF EXISTS categories CASCADE;
             DROP TABLE IF EXISTS users CASCADE;",
        )
        .await?;
        Ok(())
    }
}

const SCHEMA_SQL: &str = r"
CREATE TABLE users (
    id UUID PRIMARY KEY,
    name VARCHAR(255) NOT NULL,
    email VARCHAR(255) NOT NULL UNIQUE,
    password_hash VARCHAR(255) NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE TABLE categories (
    id UUID PRIMARY KEY,
    description VARCHAR(100) NOT NULL UNIQUE
);

CREATE TABLE entries (
    id UUID PRIMARY KEY,
    description VARCHAR(100) NOT NULL,
    month INTEGER NOT NULL CHECK (month BETWEEN 1 AND 12),
    year INTEGER NOT NULL,
    amount NUMERIC(16, 2) NOT NULL,
    entry_type VARCHAR(16) NOT NULL CHECK (entry_type IN ('income', 'expense')),
    status VARCHAR(16) NOT NULL CHECK (status IN ('pending', 'settled', 'cancelled')),
    latitude NUMERIC(9, 6),
    longitude NUMERIC(9, 6),
    category_id UUID REFERENCES categories(id) ON DELETE SET NULL,
    user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    registered_on DATE NOT NULL DEFAULT CURRENT_DATE
);

-- Search always scopes by owner
CREATE INDEX idx_entries_user_period ON entries(user_id, year, month);

-- Balance sums settled amounts per type
CREATE INDEX idx_entries_balance ON entries(user_id, entry_type, status);
";
