use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::round_money;

/// Share of each unused day refunded on a partial early return.
fn refund_rate() -> Decimal {
    Decimal::new(70, 2)
}

/// Fixed processing fee deducted from partial early-return refunds.
fn processing_fee() -> Decimal {
    Decimal::from(5)
}

/// Share kept by the client when the rental is cancelled before it started
/// (full refund minus a 10% processing cut).
fn cancellation_rate() -> Decimal {
    Decimal::new(90, 2)
}

/// Refund owed when a contract is returned early.
///
/// Policy, evaluated in order:
/// 1. no return date → 0;
/// 2. returned on or after the end date → 0;
/// 3. returned on or before the start date → `total × 0.9`;
/// 4. otherwise 70% of the per-day amount for each unused day, minus a
///    fixed 5.00 processing fee.
///
/// The per-day amount is `total / duration`; when the recorded duration is
/// zero the vehicle's current daily rate is used instead. The result is
/// floored at zero and rounded to 2 decimal places.
pub fn early_return_refund(
    start_date: NaiveDate,
    end_date: NaiveDate,
    duration_days: i32,
    total_amount: Decimal,
    fallback_daily_rate: Decimal,
    return_date: Option<NaiveDate>,
) -> Decimal {
    let Some(return_date) = return_date else {
        return Decimal::ZERO;
    };

    if return_date >= end_date {
        return Decimal::ZERO;
    }

    if return_date <= start_date {
        return round_money((total_amount * cancellation_rate()).max(Decimal::ZERO));
    }

    let unused_days = (end_date - return_date).num_days();
    if unused_days <= 0 {
        return Decimal::ZERO;
    }

    let daily_amount = if duration_days > 0 {
        total_amount / Decimal::from(duration_days)
    } else {
        fallback_daily_rate
    };

    let gross = daily_amount * Decimal::from(unused_days) * refund_rate();
    round_money((gross - processing_fee()).max(Decimal::ZERO))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 4, d).unwrap()
    }

    fn money(cents: i64) -> Decimal {
        Decimal::new(cents, 2)
    }

    #[test]
    fn no_refund_without_return_date() {
        assert_eq!(
            early_return_refund(day(1), day(11), 10, money(50000), money(5000), None),
            Decimal::ZERO
        );
    }

    #[test]
    fn no_refund_on_or_after_end_date() {
        let refund = |ret| early_return_refund(day(1), day(11), 10, money(50000), money(5000), Some(ret));
        assert_eq!(refund(day(11)), Decimal::ZERO);
        assert_eq!(refund(day(15)), Decimal::ZERO);
    }

    #[test]
    fn cancellation_before_start_keeps_ninety_percent() {
        let refund = early_return_refund(day(5), day(15), 10, money(50000), money(5000), Some(day(5)));
        assert_eq!(refund, money(45000));
    }

    #[test]
    fn partial_early_return_scenario() {
        // 500.00 over 10 days, returned 5 days early:
        // daily 50.00, gross 50 × 5 × 0.7 = 175.00, net 170.00.
        let refund = early_return_refund(day(1), day(11), 10, money(50000), money(5000), Some(day(6)));
        assert_eq!(refund, money(17000));
    }

    #[test]
    fn fixed_fee_floors_small_refunds_at_zero() {
        // 4.00 over 10 days: one unused day refunds 0.28 gross, under the fee.
        let refund = early_return_refund(day(1), day(11), 10, money(400), money(40), Some(day(10)));
        assert_eq!(refund, Decimal::ZERO);
    }

    #[test]
    fn zero_duration_falls_back_to_vehicle_rate() {
        // Degraded contract data: use the vehicle's current 50.00/day.
        // 3 unused days: 50 × 3 × 0.7 − 5 = 100.00.
        let refund = early_return_refund(day(1), day(11), 0, money(50000), money(5000), Some(day(8)));
        assert_eq!(refund, money(10000));
    }

    #[test]
    fn refund_grows_as_return_moves_earlier() {
        let refund = |d| early_return_refund(day(1), day(11), 10, money(50000), money(5000), Some(day(d)));
        let mut previous = Decimal::ZERO;
        for d in (2..=10).rev() {
            let r = refund(d);
            assert!(r >= previous, "refund shrank when returning on day {d}");
            previous = r;
        }
    }
}
