//! Property-based tests for the entry rule set and status guard.

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;

use moneta_shared::types::{EntryId, UserId};

use super::error::EntryError;
use super::status::{StatusGuard, is_future_period};
use super::types::{Entry, EntryDraft, EntryStatus, EntryType};
use super::validation::validate_entry;

fn positive_amount() -> impl Strategy<Value = Decimal> {
    (1i64..100_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

fn entry_type_strategy() -> impl Strategy<Value = EntryType> {
    prop_oneof![Just(EntryType::Income), Just(EntryType::Expense)]
}

fn valid_draft() -> impl Strategy<Value = EntryDraft> {
    (
        "[A-Za-z][A-Za-z0-9 ]{0,98}",
        1i32..=12,
        1000i32..=9999,
        positive_amount(),
        entry_type_strategy(),
    )
        .prop_map(|(description, month, year, amount, entry_type)| EntryDraft {
            description: Some(description),
            month: Some(month),
            year: Some(year),
            amount: Some(amount),
            entry_type: Some(entry_type),
            user_id: Some(UserId::new()),
            ..EntryDraft::default()
        })
}

/// Which fields to break, in rule-set order.
fn breakage() -> impl Strategy<Value = [bool; 6]> {
    prop::array::uniform6(any::<bool>()).prop_filter("at least one broken field", |b| {
        b.iter().any(|x| *x)
    })
}

fn break_fields(mut draft: EntryDraft, broken: [bool; 6]) -> EntryDraft {
    if broken[0] {
        draft.description = Some("   ".to_string());
    }
    if broken[1] {
        draft.month = Some(13);
    }
    if broken[2] {
        draft.year = Some(999);
    }
    if broken[3] {
        draft.user_id = None;
    }
    if broken[4] {
        draft.amount = Some(Decimal::ZERO);
    }
    if broken[5] {
        draft.entry_type = None;
    }
    draft
}

const ORDER: [EntryError; 6] = [
    EntryError::InvalidDescription,
    EntryError::InvalidMonth,
    EntryError::InvalidYear,
    EntryError::MissingUser,
    EntryError::InvalidAmount,
    EntryError::MissingType,
];

fn pending_entry(year: i32, month: i32) -> Entry {
    Entry {
        id: EntryId::new(),
        description: "Entry".to_string(),
        month,
        year,
        amount: Decimal::ONE,
        entry_type: EntryType::Expense,
        status: EntryStatus::Pending,
        latitude: None,
        longitude: None,
        category_id: None,
        user_id: UserId::new(),
        registered_on: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Any draft with every field valid passes the rule set.
    #[test]
    fn prop_valid_drafts_pass(draft in valid_draft()) {
        prop_assert_eq!(validate_entry(&draft), Ok(()));
    }

    /// With several broken fields only the first one in check order is reported.
    #[test]
    fn prop_first_violation_in_order_wins(draft in valid_draft(), broken in breakage()) {
        let first = broken.iter().position(|b| *b).unwrap();
        let result = validate_entry(&break_fields(draft, broken));
        prop_assert_eq!(result, Err(ORDER[first].clone()));
    }

    /// Settling succeeds exactly when the period is not after the current month.
    #[test]
    fn prop_settle_depends_only_on_period(
        year in 2000i32..2050,
        month in 1i32..=12,
        today_year in 2000i32..2050,
        today_month in 1u32..=12,
    ) {
        let today = NaiveDate::from_ymd_opt(today_year, today_month, 1).unwrap();
        let entry = pending_entry(year, month);
        let result = StatusGuard::transition(&entry, EntryStatus::Settled, today);

        if is_future_period(Some(year), Some(month), today) {
            prop_assert_eq!(result, Err(EntryError::FutureSettlement));
        } else {
            prop_assert_eq!(result, Ok(EntryStatus::Settled));
        }
    }

    /// Cancelling a pending entry never depends on the date.
    #[test]
    fn prop_cancel_has_no_date_restriction(year in 1000i32..=9999, month in 1i32..=12) {
        let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        let result = StatusGuard::transition(&pending_entry(year, month), EntryStatus::Cancelled, today);
        prop_assert_eq!(result, Ok(EntryStatus::Cancelled));
    }
}
