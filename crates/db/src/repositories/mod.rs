//! Repository implementations for data access.
//!
//! Each repository implements the matching trait from `moneta-core`,
//! hiding the `SeaORM` implementation details from the rest of the application.

pub mod category;
pub mod entry;
pub mod user;

pub use category::CategoryRepository;
pub use entry::EntryRepository;
pub use user::UserRepository;
