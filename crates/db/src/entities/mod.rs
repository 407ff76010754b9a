//! `SeaORM` entity definitions.

pub mod categories;
pub mod entries;
pub mod users;
