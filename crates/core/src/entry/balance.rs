//! Balance aggregation.

use rust_decimal::Decimal;

/// Net balance from the settled income and expense sums.
///
/// The store reports `None` when there are no settled rows of a type; that
/// counts as zero.
#[must_use]
pub fn net_balance(settled_income: Option<Decimal>, settled_expense: Option<Decimal>) -> Decimal {
    settled_income.unwrap_or(Decimal::ZERO) - settled_expense.unwrap_or(Decimal::ZERO)
}
