///! Integration tests for the rental settlement rules.
///!
///! These tests drive the pricing, penalty and refund calculations through
///! the public library API, the same way the contract lifecycle does.
///! No running server or database is needed.
///!
///! Run with: `cargo test --test settlement_test`
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use autorent_backend::db::contracts as contract_db;
use autorent_backend::domain::booking::{end_date, ranges_overlap, MAX_RENTAL_DAYS};
use autorent_backend::domain::penalty::late_penalty;
use autorent_backend::domain::pricing::rental_price;
use autorent_backend::domain::refund::early_return_refund;
use autorent_backend::error::ApiError;
use autorent_backend::jobs::{sweep_action, SweepAction};
use autorent_backend::models::contracts::{
    BreakContract, CreateContract, PaymentDetails, PaymentMethod, Status,
};

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 4, d).unwrap()
}

fn money(cents: i64) -> Decimal {
    Decimal::new(cents, 2)
}

#[test]
fn quoted_price_matches_discount_tiers() {
    let rate = money(5000); // 50.00/day

    // Up to 7 days: full price.
    assert_eq!(rental_price(rate, 7), money(35000));
    // 8..=14 days: 10% off.
    assert_eq!(rental_price(rate, 10), money(45000));
    // 15..=30 days: 15% off.
    assert_eq!(rental_price(rate, 20), money(85000));
    // Over 30 days: 30% off.
    assert_eq!(rental_price(rate, 40), money(140000));
}

#[test]
fn on_time_return_settles_at_zero() {
    // Contract [1, 11], returned exactly on the end date: no penalty yet
    // (a contract is late only strictly past its end date) and no refund.
    let rate = money(5000);
    assert_eq!(late_penalty(Status::Active, day(11), rate, day(11)), Decimal::ZERO);
    assert_eq!(
        early_return_refund(day(1), day(11), 10, money(45000), rate, Some(day(11))),
        Decimal::ZERO
    );
}

#[test]
fn late_return_owes_penalty_and_no_refund() {
    // 3 days past the end date at 50.00/day: 3 × 50 × 1.5 = 225.00.
    let rate = money(5000);
    let today = day(14);
    assert_eq!(late_penalty(Status::Active, day(11), rate, today), money(22500));
    assert_eq!(
        early_return_refund(day(1), day(11), 10, money(45000), rate, Some(today)),
        Decimal::ZERO
    );
}

#[test]
fn early_return_owes_refund_and_no_penalty() {
    // 500.00 over 10 days, returned 5 days early:
    // 50.00/day × 5 unused days × 0.7 − 5.00 fee = 170.00.
    let rate = money(5000);
    let returned = day(6);
    assert_eq!(
        early_return_refund(day(1), day(11), 10, money(50000), rate, Some(returned)),
        money(17000)
    );
    assert_eq!(late_penalty(Status::Active, day(11), rate, returned), Decimal::ZERO);
}

#[test]
fn cancellation_before_start_refunds_ninety_percent() {
    let refund = early_return_refund(day(5), day(15), 10, money(36000), money(5000), Some(day(3)));
    assert_eq!(refund, money(32400));
}

#[test]
fn payment_details_shape_must_match_method() {
    let card = PaymentDetails::Card {
        card_number: "4111111111111111".to_string(),
        expiry: "12/27".to_string(),
    };
    assert!(card.matches(PaymentMethod::Card));
    assert!(!card.matches(PaymentMethod::Transfer));
    assert!(!card.matches(PaymentMethod::Cash));

    let transfer = PaymentDetails::Transfer {
        bank_account: "FR7612345678901234567890123".to_string(),
    };
    assert!(transfer.matches(PaymentMethod::Transfer));
    assert!(!transfer.matches(PaymentMethod::Check));

    let mobile = PaymentDetails::Mobile {
        phone_number: "+33612345678".to_string(),
    };
    assert!(mobile.matches(PaymentMethod::Mobile));
    assert!(!mobile.matches(PaymentMethod::Card));
}

#[test]
fn booking_window_spans_the_whole_rental() {
    let start = day(1);
    let end = end_date(start, MAX_RENTAL_DAYS);
    assert_eq!(end, NaiveDate::from_ymd_opt(2027, 4, 1).unwrap());
}

#[test]
fn overlapping_requests_for_the_same_vehicle_conflict() {
    // Existing blocking booking [3, 10].
    let (held_start, held_end) = (day(3), day(10));

    // Straddling request [5, 12] conflicts.
    assert!(ranges_overlap(day(5), day(12), held_start, held_end));
    // A request starting the day the existing booking ends still conflicts.
    assert!(ranges_overlap(held_end, day(15), held_start, held_end));
    // A request starting the next day does not.
    assert!(!ranges_overlap(day(11), day(15), held_start, held_end));
}

// Creation and break validations run before the first query, so an
// unconnected `DatabaseConnection` is enough to exercise the rejections.

fn booking(duration_days: i32, method: PaymentMethod, details: Option<PaymentDetails>) -> CreateContract {
    CreateContract {
        client_id: Uuid::new_v4(),
        vehicle_id: Uuid::new_v4(),
        start_date: day(1),
        duration_days,
        payment_method: method,
        payment_details: details,
    }
}

#[tokio::test]
async fn creation_rejects_out_of_policy_durations() {
    let db = DatabaseConnection::default();

    let result = contract_db::create_contract(&db, "admin", booking(0, PaymentMethod::Cash, None), day(1)).await;
    assert!(matches!(result, Err(ApiError::Validation(_))));

    let result = contract_db::create_contract(&db, "admin", booking(366, PaymentMethod::Cash, None), day(1)).await;
    assert!(matches!(result, Err(ApiError::Validation(_))));

    // Only creation enforces the cap; quoting an out-of-policy duration
    // still prices it (40 days at 50.00/day, 30% off).
    assert_eq!(rental_price(money(5000), 40), money(140000));
}

#[tokio::test]
async fn creation_rejects_a_start_date_in_the_past() {
    let db = DatabaseConnection::default();
    let result = contract_db::create_contract(&db, "admin", booking(5, PaymentMethod::Cash, None), day(2)).await;
    assert!(matches!(result, Err(ApiError::Validation(_))));
}

#[tokio::test]
async fn creation_rejects_mismatched_payment_details() {
    let db = DatabaseConnection::default();

    // Cash must carry no details.
    let details = PaymentDetails::Check {
        check_number: "0042".to_string(),
    };
    let result = contract_db::create_contract(
        &db,
        "admin",
        booking(5, PaymentMethod::Cash, Some(details)),
        day(1),
    )
    .await;
    assert!(matches!(result, Err(ApiError::Validation(_))));

    // Every other method requires details.
    let result =
        contract_db::create_contract(&db, "admin", booking(5, PaymentMethod::Card, None), day(1)).await;
    assert!(matches!(result, Err(ApiError::Validation(_))));

    // And the payload shape has to match the method.
    let details = PaymentDetails::Card {
        card_number: "4111111111111111".to_string(),
        expiry: "12/27".to_string(),
    };
    let result = contract_db::create_contract(
        &db,
        "admin",
        booking(5, PaymentMethod::Transfer, Some(details)),
        day(1),
    )
    .await;
    assert!(matches!(result, Err(ApiError::Validation(_))));
}

#[tokio::test]
async fn breaking_requires_date_reason_and_fee() {
    let db = DatabaseConnection::default();
    let id = Uuid::new_v4();

    let missing_date = BreakContract {
        break_date: None,
        break_reason: Some("accident".to_string()),
        break_fee: Some(money(10000)),
    };
    let result = contract_db::break_contract(&db, "admin", id, missing_date).await;
    assert!(matches!(result, Err(ApiError::Validation(_))));

    let missing_fee = BreakContract {
        break_date: Some(day(3)),
        break_reason: Some("accident".to_string()),
        break_fee: None,
    };
    let result = contract_db::break_contract(&db, "admin", id, missing_fee).await;
    assert!(matches!(result, Err(ApiError::Validation(_))));

    let blank_reason = BreakContract {
        break_date: Some(day(3)),
        break_reason: Some("   ".to_string()),
        break_fee: Some(money(10000)),
    };
    let result = contract_db::break_contract(&db, "admin", id, blank_reason).await;
    assert!(matches!(result, Err(ApiError::Validation(_))));
}

#[test]
fn sweep_classifies_active_contracts_only() {
    // Past the end date: flip to overdue.
    assert_eq!(
        sweep_action(Status::Active, day(10), day(12)),
        Some(SweepAction::MarkOverdue)
    );
    // Ending in two days: reminder.
    assert_eq!(
        sweep_action(Status::Active, day(14), day(12)),
        Some(SweepAction::Remind { days_left: 2 })
    );
    // Already overdue or closed: the sweep leaves it alone.
    assert_eq!(sweep_action(Status::Overdue, day(10), day(12)), None);
    assert_eq!(sweep_action(Status::Terminated, day(10), day(12)), None);

    // A penalty keeps accruing while the contract is still marked active,
    // and freezes once the sweep has flipped it.
    let rate = money(5000);
    assert!(late_penalty(Status::Active, day(10), rate, day(12)) > Decimal::ZERO);
    assert_eq!(late_penalty(Status::Overdue, day(10), rate, day(12)), Decimal::ZERO);
}
