use rust_decimal::Decimal;

use super::round_money;

/// Total rental price for `duration_days` at `daily_rate`, with long-rental
/// discount tiers evaluated from longest to shortest (first match wins):
/// more than 30 days → 30% off, more than 14 → 15% off, more than 7 → 10% off.
///
/// Precondition: `duration_days >= 1` and `daily_rate >= 0`. Duration caps
/// (365 days) are enforced at contract creation, not here — quoting a price
/// for an out-of-policy duration is allowed.
pub fn rental_price(daily_rate: Decimal, duration_days: i64) -> Decimal {
    let base = daily_rate * Decimal::from(duration_days);

    let factor = if duration_days > 30 {
        Decimal::new(70, 2)
    } else if duration_days > 14 {
        Decimal::new(85, 2)
    } else if duration_days > 7 {
        Decimal::new(90, 2)
    } else {
        Decimal::ONE
    };

    round_money(base * factor)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rate(units: i64) -> Decimal {
        Decimal::from(units)
    }

    #[test]
    fn seven_days_pays_full_price() {
        assert_eq!(rental_price(rate(50), 7), Decimal::new(35000, 2));
    }

    #[test]
    fn eighth_day_triggers_ten_percent_off() {
        assert_eq!(rental_price(rate(50), 8), Decimal::new(36000, 2));
    }

    #[test]
    fn tier_boundaries() {
        // 14 days still in the 10% tier, 15 in the 15% tier.
        assert_eq!(rental_price(rate(10), 14), Decimal::new(12600, 2));
        assert_eq!(rental_price(rate(10), 15), Decimal::new(12750, 2));
        // 30 days in the 15% tier, 31 in the 30% tier.
        assert_eq!(rental_price(rate(10), 30), Decimal::new(25500, 2));
        assert_eq!(rental_price(rate(10), 31), Decimal::new(21700, 2));
    }

    #[test]
    fn per_day_rate_never_increases_with_longer_tiers() {
        let r = rate(50);
        let per_day = |d: i64| rental_price(r, d) / Decimal::from(d);
        assert!(per_day(31) <= per_day(15));
        assert!(per_day(15) <= per_day(8));
        assert!(per_day(8) <= per_day(7));
    }

    #[test]
    fn zero_rate_is_free() {
        assert_eq!(rental_price(Decimal::ZERO, 40), Decimal::ZERO);
    }
}
