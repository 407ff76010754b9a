//! Users: registration, authentication and password hashing.

mod error;
mod password;
mod service;
mod types;

pub use error::UserError;
pub use password::{PasswordError, hash_password, verify_password};
pub use service::{UserRepository, UserService};
pub use types::{NewUser, User};
