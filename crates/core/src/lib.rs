//! Core business logic for Moneta.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! Persistence is reached through the repository traits each module declares.
//!
//! # Modules
//!
//! - `entry` - Financial entries, validation, status guard and balance
//! - `import` - Bulk CSV import with per-row diagnostics
//! - `category` - Entry categories
//! - `user` - Registration, authentication and password hashing

pub mod category;
pub mod entry;
pub mod import;
pub mod user;

#[cfg(test)]
mod testing;
