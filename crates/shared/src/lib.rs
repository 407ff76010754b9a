//! Shared types and configuration for Moneta.
//!
//! This crate provides common types used across all other crates:
//! - Typed IDs for type-safe entity references
//! - Configuration management
//! - JWT claims and token handling

pub mod auth;
pub mod config;
pub mod jwt;
pub mod types;


pub use auth::{AuthToken, Claims};
pub use config::AppConfig;
pub use jwt::{JwtError, JwtService};
