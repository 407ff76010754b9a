//! Property-based tests for import field validators and rows.

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;

use moneta_shared::types::{CategoryId, UserId};

use super::fields::{self, Column, Severity};
use super::row::{RowContext, RowOutcome};

fn context() -> RowContext<impl Fn(&str) -> Option<CategoryId>> {
    RowContext {
        owner: UserId::new(),
        registered_on: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
        find_category: |_: &str| None,
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Months 1-12 pass and every other integer is a hard failure.
    #[test]
    fn prop_month_range(value in -100i32..100) {
        let result = fields::month(&value.to_string());
        if (1..=12).contains(&value) {
            prop_assert_eq!(result, Ok(value));
        } else {
            prop_assert_eq!(result.unwrap_err().severity, Severity::Hard);
        }
    }

    /// Coordinates within NUMERIC(9,6) are kept as written.
    #[test]
    fn prop_coordinate_within_format_is_kept(units in -999_999_999i64..=999_999_999, column in prop_oneof![Just(Column::Latitude), Just(Column::Longitude)]) {
        let value = Decimal::new(units, 6);
        prop_assert_eq!(fields::coordinate(column, &value.to_string()), Ok(Some(value)));
    }

    /// Coordinates with four or more integer digits are only ever soft failures.
    #[test]
    fn prop_coordinate_overflow_is_soft(integer in 1000i64..1_000_000_000, fraction in 0u32..1000) {
        let raw = format!("{integer}.{fraction}");
        let err = fields::coordinate(Column::Longitude, &raw).unwrap_err();
        prop_assert_eq!(err.severity, Severity::Soft);
    }

    /// Non-negative amounts parse back to the written value.
    #[test]
    fn prop_non_negative_amount_accepted(cents in 0i64..1_000_000_000) {
        let value = Decimal::new(cents, 2);
        prop_assert_eq!(fields::amount(&value.to_string()), Ok(value));
    }

    /// Amounts with more than two fractional digits are hard failures.
    #[test]
    fn prop_amount_scale_above_two_rejected(units in 1i64..1_000_000_000, scale in 3u32..8) {
        let value = Decimal::new(units * 10 + 1, scale);
        let err = fields::amount(&value.to_string()).unwrap_err();
        prop_assert_eq!(err.severity, Severity::Hard);
    }

    /// Any row whose column count is not eight is rejected with the count message.
    #[test]
    fn prop_wrong_column_count_rejected(count in 0usize..20, row_number in 1usize..500) {
        prop_assume!(count != 8);
        let cells = vec!["x"; count];
        let outcome = context().process(row_number, &cells);
        prop_assert_eq!(
            outcome,
            RowOutcome::HardFailure {
                message: format!(
                    "- Row {row_number}: wrong number of columns (expected: 8, found: {count})."
                ),
            }
        );
    }

    /// A valid row with a bad coordinate still yields an entry.
    #[test]
    fn prop_bad_coordinate_never_drops_row(garbage in "[a-z]{1,10}") {
        let cells = ["Rent", "6", "2024", "10.00", "DESPESA", garbage.as_str(), "", ""];
        let outcome = context().process(1, &cells);
        let is_soft = matches!(outcome, RowOutcome::SoftFailure { .. });
        prop_assert!(is_soft);
    }
}
