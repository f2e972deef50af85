use chrono::{Days, NaiveDate};

/// Longest rental accepted at contract creation.
pub const MAX_RENTAL_DAYS: i32 = 365;

/// Computed end of a rental starting on `start` and lasting `duration_days`.
pub fn end_date(start: NaiveDate, duration_days: i32) -> NaiveDate {
    start
        .checked_add_days(Days::new(duration_days.max(0) as u64))
        .unwrap_or(NaiveDate::MAX)
}

/// Inclusive-on-both-ends overlap test between two booking intervals.
/// A back-to-back booking that starts the day an existing one ends counts
/// as a conflict.
pub fn ranges_overlap(
    a_start: NaiveDate,
    a_end: NaiveDate,
    b_start: NaiveDate,
    b_end: NaiveDate,
) -> bool {
    a_start <= b_end && a_end >= b_start
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 5, d).unwrap()
    }

    #[test]
    fn contained_and_straddling_intervals_conflict() {
        // Existing booking [3, 10]; request [5, 12] overlaps.
        assert!(ranges_overlap(day(5), day(12), day(3), day(10)));
        // Fully contained.
        assert!(ranges_overlap(day(4), day(6), day(3), day(10)));
    }

    #[test]
    fn touching_endpoints_conflict() {
        assert!(ranges_overlap(day(10), day(15), day(3), day(10)));
        assert!(ranges_overlap(day(1), day(3), day(3), day(10)));
    }

    #[test]
    fn disjoint_intervals_do_not_conflict() {
        assert!(!ranges_overlap(day(11), day(15), day(3), day(10)));
        assert!(!ranges_overlap(day(1), day(2), day(3), day(10)));
    }

    #[test]
    fn end_date_adds_duration() {
        assert_eq!(end_date(day(1), 10), day(11));
    }
}
