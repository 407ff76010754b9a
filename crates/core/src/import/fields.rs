//! Field validators for import rows.
//!
//! Each validator reads one raw cell. Failures carry the column and a
//! severity: hard failures reject the row, soft failures null the field and
//! let the row through.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;

use moneta_shared::types::CategoryId;

use crate::entry::types::DESCRIPTION_MAX_LEN;
use crate::entry::validation::{is_four_digit_year, is_valid_month};
use crate::entry::{
    AMOUNT_MAX_INTEGER_DIGITS, AMOUNT_MAX_SCALE, COORDINATE_MAX_INTEGER_DIGITS,
    COORDINATE_MAX_SCALE, EntryType, fits_amount_envelope, fits_coordinate_envelope,
};

/// Number of columns every row must have.
pub const EXPECTED_COLUMNS: usize = 8;

/// Import file columns, in file order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    /// `descricao`
    Description,
    /// `mes`
    Month,
    /// `ano`
    Year,
    /// `valor`
    Amount,
    /// `tipo`
    Type,
    /// `latitude`
    Latitude,
    /// `longitude`
    Longitude,
    /// `categoria`
    Category,
}

impl Column {
    /// Every column, in file order.
    pub const ALL: [Self; EXPECTED_COLUMNS] = [
        Self::Description,
        Self::Month,
        Self::Year,
        Self::Amount,
        Self::Type,
        Self::Latitude,
        Self::Longitude,
        Self::Category,
    ];

    /// Zero-based position in a row.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Description => 0,
            Self::Month => 1,
            Self::Year => 2,
            Self::Amount => 3,
            Self::Type => 4,
            Self::Latitude => 5,
            Self::Longitude => 6,
            Self::Category => 7,
        }
    }

    /// Header name used in the file and in diagnostics.
    #[must_use]
    pub const fn header(self) -> &'static str {
        match self {
            Self::Description => "descricao",
            Self::Month => "mes",
            Self::Year => "ano",
            Self::Amount => "valor",
            Self::Type => "tipo",
            Self::Latitude => "latitude",
            Self::Longitude => "longitude",
            Self::Category => "categoria",
        }
    }
}

/// How a field failure affects its row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The row is rejected.
    Hard,
    /// The field is nulled and the row is kept.
    Soft,
}

/// A failed field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Offending column.
    pub column: Column,
    /// Effect on the row.
    pub severity: Severity,
    /// Human-readable reason.
    pub reason: String,
}

impl FieldError {
    fn hard(column: Column, reason: impl Into<String>) -> Self {
        Self {
            column,
            severity: Severity::Hard,
            reason: reason.into(),
        }
    }

    fn soft(column: Column, reason: impl Into<String>) -> Self {
        Self {
            column,
            severity: Severity::Soft,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Column {}: {}", self.column.header(), self.reason)
    }
}

/// `descricao`: non-empty after trimming, at most 100 characters.
pub fn description(raw: &str) -> Result<String, FieldError> {
    let value = raw.trim();
    if value.is_empty() {
        return Err(FieldError::hard(Column::Description, "description is empty."));
    }
    let len = value.chars().count();
    if len > DESCRIPTION_MAX_LEN {
        return Err(FieldError::hard(
            Column::Description,
            format!("description longer than {DESCRIPTION_MAX_LEN} characters (found: {len})."),
        ));
    }
    Ok(value.to_string())
}

/// `mes`: an integer from 1 to 12.
pub fn month(raw: &str) -> Result<i32, FieldError> {
    let value = parse_int(Column::Month, raw)?;
    if !is_valid_month(value) {
        return Err(FieldError::hard(
            Column::Month,
            format!("invalid month (value: {value})."),
        ));
    }
    Ok(value)
}

/// `ano`: an integer written with exactly four digits.
pub fn year(raw: &str) -> Result<i32, FieldError> {
    let value = parse_int(Column::Year, raw)?;
    if !is_four_digit_year(value) {
        return Err(FieldError::hard(
            Column::Year,
            format!("year must have 4 digits (value: {value})."),
        ));
    }
    Ok(value)
}

/// `valor`: a non-negative decimal within the stored format. Zero is accepted.
pub fn amount(raw: &str) -> Result<Decimal, FieldError> {
    let value = parse_decimal(raw)
        .ok_or_else(|| FieldError::hard(Column::Amount, "invalid number format."))?;
    if value.is_sign_negative() && !value.is_zero() {
        return Err(FieldError::hard(
            Column::Amount,
            format!("amount cannot be negative (value: {value})."),
        ));
    }
    if !fits_amount_envelope(value) {
        return Err(FieldError::hard(
            Column::Amount,
            format!(
                "amount exceeds {AMOUNT_MAX_INTEGER_DIGITS} integer or {AMOUNT_MAX_SCALE} fractional digits (value: {value})."
            ),
        ));
    }
    Ok(value)
}

/// `tipo`: `RECEITA` or `DESPESA`, ignoring case.
pub fn entry_type(raw: &str) -> Result<EntryType, FieldError> {
    EntryType::from_csv_label(raw).ok_or_else(|| {
        FieldError::hard(
            Column::Type,
            format!(
                "type must be 'RECEITA' or 'DESPESA' (value: {}).",
                raw.trim().to_uppercase()
            ),
        )
    })
}

/// `latitude` / `longitude`: optional decimal within the stored format.
///
/// A blank cell is `Ok(None)`. Anything unreadable or too large is a soft failure.
pub fn coordinate(column: Column, raw: &str) -> Result<Option<Decimal>, FieldError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    let value = parse_decimal(raw).ok_or_else(|| {
        FieldError::soft(
            column,
            format!("invalid number format (value: {raw}); field ignored."),
        )
    })?;
    if !fits_coordinate_envelope(value) {
        return Err(FieldError::soft(
            column,
            format!(
                "value {raw} exceeds {COORDINATE_MAX_INTEGER_DIGITS} integer or {COORDINATE_MAX_SCALE} fractional digits; field ignored."
            ),
        ));
    }
    Ok(Some(value))
}

/// `categoria`: optional, matched by exact trimmed description.
///
/// A blank cell is `Ok(None)`. An unknown name is a soft failure.
pub fn category<F>(raw: &str, find_category: F) -> Result<Option<CategoryId>, FieldError>
where
    F: Fn(&str) -> Option<CategoryId>,
{
    let name = raw.trim();
    if name.is_empty() {
        return Ok(None);
    }
    find_category(name).map(Some).ok_or_else(|| {
        FieldError::soft(
            Column::Category,
            format!("category '{name}' not found; entry imported without category."),
        )
    })
}

/// Plain decimal notation only; `_` digit separators are refused.
fn parse_decimal(raw: &str) -> Option<Decimal> {
    let raw = raw.trim();
    if raw.contains('_') {
        return None;
    }
    Decimal::from_str(raw).ok()
}

fn parse_int(column: Column, raw: &str) -> Result<i32, FieldError> {
    raw.trim()
        .parse::<i32>()
        .map_err(|_| FieldError::hard(column, "invalid number format."))
}
