//! Bulk CSV import.
//!
//! An upload is read with a header line and eight columns per row:
//! `descricao, mes, ano, valor, tipo, latitude, longitude, categoria`.
//! Invalid rows never abort the import; they are reported in the result.

mod error;
mod fields;
mod row;
mod service;
mod types;

#[cfg(test)]
mod fields_props;

pub use error::ImportError;
pub use fields::{Column, EXPECTED_COLUMNS, FieldError, Severity};
pub use row::{RowContext, RowOutcome};
pub use service::ImportService;
pub use types::ImportResult;
