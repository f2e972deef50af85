use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::round_money;
use crate::models::contracts::Status;

/// Daily penalty multiplier: 150% of the vehicle's daily rate.
fn daily_penalty_rate(daily_rate: Decimal) -> Decimal {
    daily_rate * Decimal::new(15, 1)
}

/// Whether a contract counts as late: still `active` (not yet flipped to
/// `overdue` by the sweep) and past its end date.
pub fn is_late(status: Status, end_date: NaiveDate, today: NaiveDate) -> bool {
    status == Status::Active && end_date < today
}

/// Penalty accrued by a late contract: one and a half daily rates per whole
/// day past the end date. Zero when the contract is not late.
pub fn late_penalty(
    status: Status,
    end_date: NaiveDate,
    daily_rate: Decimal,
    today: NaiveDate,
) -> Decimal {
    if !is_late(status, end_date, today) {
        return Decimal::ZERO;
    }

    let days_late = (today - end_date).num_days();
    round_money(Decimal::from(days_late) * daily_penalty_rate(daily_rate))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, d).unwrap()
    }

    #[test]
    fn no_penalty_before_or_on_end_date() {
        let rate = Decimal::from(50);
        assert_eq!(late_penalty(Status::Active, day(10), rate, day(9)), Decimal::ZERO);
        assert_eq!(late_penalty(Status::Active, day(10), rate, day(10)), Decimal::ZERO);
    }

    #[test]
    fn penalty_accrues_per_day_at_150_percent() {
        let rate = Decimal::from(50);
        // 3 days late at 75.00/day.
        assert_eq!(
            late_penalty(Status::Active, day(10), rate, day(13)),
            Decimal::new(22500, 2)
        );
    }

    #[test]
    fn no_penalty_once_status_left_active() {
        let rate = Decimal::from(50);
        assert_eq!(late_penalty(Status::Overdue, day(10), rate, day(13)), Decimal::ZERO);
        assert_eq!(late_penalty(Status::Terminated, day(10), rate, day(13)), Decimal::ZERO);
    }
}
