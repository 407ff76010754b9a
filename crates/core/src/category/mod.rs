//! Entry categories.
//!
//! Categories are identified by a unique description. The importer matches
//! the `categoria` column against it verbatim (after trimming).

mod error;
mod service;

pub use error::CategoryError;
pub use service::{CategoryRepository, CategoryService};

use serde::{Deserialize, Serialize};

use moneta_shared::types::CategoryId;

/// Maximum category description length, in characters.
pub const CATEGORY_DESCRIPTION_MAX_LEN: usize = 100;

/// An entry category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Category ID.
    pub id: CategoryId,
    /// Unique description.
    pub description: String,
}
