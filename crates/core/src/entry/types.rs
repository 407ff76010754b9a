//! Entry domain types.
//!
//! An entry is a single income or expense movement owned by one user. The
//! types here are shared by the CRUD service, the status guard and the CSV
//! importer.

use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use moneta_shared::types::{CategoryId, EntryId, UserId};

/// Largest number of fractional digits a stored coordinate may carry.
pub const COORDINATE_MAX_SCALE: u32 = 6;

/// Largest number of integer digits a stored coordinate may carry.
pub const COORDINATE_MAX_INTEGER_DIGITS: u32 = 3;

/// Largest number of fractional digits a stored amount may carry.
pub const AMOUNT_MAX_SCALE: u32 = 2;

/// Largest number of integer digits a stored amount may carry.
pub const AMOUNT_MAX_INTEGER_DIGITS: u32 = 14;

/// Maximum description length, in characters.
pub const DESCRIPTION_MAX_LEN: usize = 100;

/// Direction of an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    /// Money coming in.
    Income,
    /// Money going out.
    Expense,
}

impl EntryType {
    /// Returns the string representation of the type.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }

    /// Parses a type from a query parameter or request body.
    ///
    /// Accepts the English names and the Portuguese CSV labels, ignoring case.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "income" | "receita" => Some(Self::Income),
            "expense" | "despesa" => Some(Self::Expense),
            _ => None,
        }
    }

    /// Parses the `tipo` column of an import file.
    ///
    /// Only `RECEITA` and `DESPESA` are accepted, ignoring case.
    pub fn from_csv_label(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "RECEITA" => Some(Self::Income),
            "DESPESA" => Some(Self::Expense),
            _ => None,
        }
    }
}

impl fmt::Display for EntryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle status of an entry.
///
/// Valid transitions:
/// - Pending → Settled
/// - Pending → Cancelled
///
/// Settled and Cancelled are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryStatus {
    /// Recorded but not yet realized.
    Pending,
    /// Realized (paid or received).
    Settled,
    /// Cancelled, never realized.
    Cancelled,
}

impl EntryStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Settled => "settled",
            Self::Cancelled => "cancelled",
        }
    }

    /// Parses a status, ignoring case.
    ///
    /// The Portuguese labels `PENDENTE`, `EFETIVADO` and `CANCELADO` are accepted too.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "pending" | "pendente" => Some(Self::Pending),
            "settled" | "efetivado" => Some(Self::Settled),
            "cancelled" | "canceled" | "cancelado" => Some(Self::Cancelled),
            _ => None,
        }
    }

    /// Returns true if no further edits or transitions are allowed.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Settled | Self::Cancelled)
    }
}

impl fmt::Display for EntryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A persisted financial entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Entry ID.
    pub id: EntryId,
    /// Free-text description.
    pub description: String,
    /// Month of competence (1-12).
    pub month: i32,
    /// Year of competence (four digits).
    pub year: i32,
    /// Amount, always non-negative.
    pub amount: Decimal,
    /// Income or expense.
    #[serde(rename = "type")]
    pub entry_type: EntryType,
    /// Lifecycle status.
    pub status: EntryStatus,
    /// Optional latitude.
    pub latitude: Option<Decimal>,
    /// Optional longitude.
    pub longitude: Option<Decimal>,
    /// Optional category.
    pub category_id: Option<CategoryId>,
    /// Owner.
    pub user_id: UserId,
    /// Day the entry was recorded.
    pub registered_on: NaiveDate,
}

/// Unvalidated entry fields, as received from a client.
///
/// Every field is optional so the rule set can report which one is missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryDraft {
    /// Free-text description.
    pub description: Option<String>,
    /// Month of competence.
    pub month: Option<i32>,
    /// Year of competence.
    pub year: Option<i32>,
    /// Amount.
    pub amount: Option<Decimal>,
    /// Income or expense.
    #[serde(rename = "type")]
    pub entry_type: Option<EntryType>,
    /// Optional latitude.
    pub latitude: Option<Decimal>,
    /// Optional longitude.
    pub longitude: Option<Decimal>,
    /// Optional category.
    pub category_id: Option<CategoryId>,
    /// Owner.
    #[serde(alias = "user")]
    pub user_id: Option<UserId>,
}

/// Search criteria for entries of one user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryFilter {
    /// Owner whose entries are searched.
    pub user_id: UserId,
    /// Case-insensitive substring of the description.
    pub description: Option<String>,
    /// Exact month.
    pub month: Option<i32>,
    /// Exact year.
    pub year: Option<i32>,
    /// Exact category.
    pub category_id: Option<CategoryId>,
    /// Exact type.
    pub entry_type: Option<EntryType>,
}

impl EntryFilter {
    /// Creates a filter that matches every entry of a user.
    #[must_use]
    pub const fn for_user(user_id: UserId) -> Self {
        Self {
            user_id,
            description: None,
            month: None,
            year: None,
            category_id: None,
            entry_type: None,
        }
    }

    /// Returns true if the entry satisfies every criterion.
    #[must_use]
    pub fn matches(&self, entry: &Entry) -> bool {
        entry.user_id == self.user_id
            && self.description.as_deref().is_none_or(|needle| {
                entry
                    .description
                    .to_lowercase()
                    .contains(&needle.to_lowercase())
            })
            && self.month.is_none_or(|m| entry.month == m)
            && self.year.is_none_or(|y| entry.year == y)
            && self
                .category_id
                .is_none_or(|c| entry.category_id == Some(c))
            && self.entry_type.is_none_or(|t| entry.entry_type == t)
    }
}

/// Returns true if the value fits the stored coordinate format.
///
/// At most three integer digits and six fractional digits. The scale is the
/// one the value was written with, so `1.5000000` is rejected.
#[must_use]
pub fn fits_coordinate_envelope(value: Decimal) -> bool {
    value.scale() <= COORDINATE_MAX_SCALE && integer_digits(value) <= COORDINATE_MAX_INTEGER_DIGITS
}

/// Returns true if the value fits the stored amount format.
///
/// At most fourteen integer digits and two fractional digits, checked the
/// same way as coordinates.
#[must_use]
pub fn fits_amount_envelope(value: Decimal) -> bool {
    value.scale() <= AMOUNT_MAX_SCALE && integer_digits(value) <= AMOUNT_MAX_INTEGER_DIGITS
}

/// Number of digits before the decimal point, with zero counting as none.
fn integer_digits(value: Decimal) -> u32 {
    let mut whole = value.abs().trunc();
    let ten = Decimal::TEN;
    let mut digits = 0;
    while !whole.is_zero() {
        whole = (whole / ten).trunc();
        digits += 1;
    }
    digits
}
