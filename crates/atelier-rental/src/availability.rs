//! Booked-date expansion and range overlap checks.
//!
//! Pure functions over a snapshot of bookings: nothing here mutates its
//! input or performs I/O.

use std::collections::BTreeSet;

use chrono::NaiveDate;

use crate::booking::Booking;

/// Every calendar day held by a non-cancelled booking, endpoints included.
pub fn booked_dates(bookings: &[Booking]) -> BTreeSet<NaiveDate> {
    bookings
        .iter()
        .filter_map(Booking::blocked_span)
        .flat_map(|(start, end)| start.iter_days().take_while(move |day| *day <= end))
        .collect()
}

/// Closed-interval intersection: `[a, b]` meets `[c, d]` iff `a <= d && b >= c`.
pub fn ranges_intersect(a: NaiveDate, b: NaiveDate, c: NaiveDate, d: NaiveDate) -> bool {
    a <= d && b >= c
}

/// The first non-cancelled booking whose dates intersect `[start, end]`.
pub fn conflicting_booking(
    start: NaiveDate,
    end: NaiveDate,
    bookings: &[Booking],
) -> Option<&Booking> {
    bookings.iter().find(|booking| {
        booking
            .blocked_span()
            .is_some_and(|(booked_start, booked_end)| {
                ranges_intersect(start, end, booked_start, booked_end)
            })
    })
}

/// Whether `[start, end]` touches any non-cancelled booking.
pub fn overlaps(start: NaiveDate, end: NaiveDate, bookings: &[Booking]) -> bool {
    conflicting_booking(start, end, bookings).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::booking::BookingStatus;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn booking(id: &str, start: NaiveDate, end: NaiveDate, status: BookingStatus) -> Booking {
        Booking {
            id: id.into(),
            product_id: "bridal-aurora".into(),
            user_id: "user-1".into(),
            start_date: start,
            end_date: end,
            status,
        }
    }

    fn march_booking() -> Vec<Booking> {
        vec![booking(
            "r-1",
            date(2026, 3, 10),
            date(2026, 3, 14),
            BookingStatus::Booked,
        )]
    }

    #[test]
    fn booked_dates_expand_inclusively() {
        let dates = booked_dates(&march_booking());
        assert_eq!(dates.len(), 5);
        for day in 10..=14 {
            assert!(dates.contains(&date(2026, 3, day)), "missing March {day}");
        }
        assert!(!dates.contains(&date(2026, 3, 9)));
        assert!(!dates.contains(&date(2026, 3, 15)));
    }

    #[test]
    fn booked_dates_skip_cancelled() {
        let bookings = vec![booking(
            "r-1",
            date(2026, 3, 10),
            date(2026, 3, 14),
            BookingStatus::Cancelled,
        )];
        assert!(booked_dates(&bookings).is_empty());
    }

    #[test]
    fn booked_dates_union_collapses_duplicates() {
        let bookings = vec![
            booking("a", date(2026, 3, 10), date(2026, 3, 12), BookingStatus::Pending),
            booking("b", date(2026, 3, 12), date(2026, 3, 13), BookingStatus::Active),
            booking("c", date(2026, 3, 1), date(2026, 3, 31), BookingStatus::Cancelled),
        ];
        let dates: Vec<_> = booked_dates(&bookings).into_iter().collect();
        assert_eq!(
            dates,
            vec![
                date(2026, 3, 10),
                date(2026, 3, 11),
                date(2026, 3, 12),
                date(2026, 3, 13),
            ]
        );
    }

    #[test]
    fn booked_dates_cross_month_boundary() {
        let bookings = vec![booking(
            "r-1",
            date(2026, 2, 27),
            date(2026, 3, 2),
            BookingStatus::Booked,
        )];
        let dates = booked_dates(&bookings);
        assert_eq!(dates.len(), 4);
        assert!(dates.contains(&date(2026, 2, 28)));
        assert!(dates.contains(&date(2026, 3, 1)));
    }

    #[test]
    fn single_day_booking_blocks_one_date() {
        let bookings = vec![booking(
            "r-1",
            date(2026, 6, 1),
            date(2026, 6, 1),
            BookingStatus::Returned,
        )];
        assert_eq!(booked_dates(&bookings).len(), 1);
    }

    #[test]
    fn range_inside_booking_overlaps() {
        assert!(overlaps(date(2026, 3, 12), date(2026, 3, 13), &march_booking()));
    }

    #[test]
    fn range_after_booking_is_free() {
        assert!(!overlaps(date(2026, 3, 15), date(2026, 3, 17), &march_booking()));
    }

    #[test]
    fn range_before_booking_is_free() {
        assert!(!overlaps(date(2026, 3, 1), date(2026, 3, 9), &march_booking()));
    }

    #[test]
    fn shared_endpoint_overlaps() {
        assert!(overlaps(date(2026, 3, 14), date(2026, 3, 16), &march_booking()));
        assert!(overlaps(date(2026, 3, 8), date(2026, 3, 10), &march_booking()));
    }

    #[test]
    fn range_covering_booking_overlaps() {
        assert!(overlaps(date(2026, 3, 1), date(2026, 3, 31), &march_booking()));
    }

    #[test]
    fn cancelled_booking_never_overlaps() {
        let bookings = vec![booking(
            "r-1",
            date(2026, 3, 10),
            date(2026, 3, 14),
            BookingStatus::Cancelled,
        )];
        assert!(!overlaps(date(2026, 3, 12), date(2026, 3, 13), &bookings));
    }

    #[test]
    fn overlap_is_symmetric() {
        let samples = [
            (date(2026, 3, 10), date(2026, 3, 14)),
            (date(2026, 3, 12), date(2026, 3, 13)),
            (date(2026, 3, 14), date(2026, 3, 20)),
            (date(2026, 3, 15), date(2026, 3, 17)),
            (date(2026, 3, 1), date(2026, 3, 9)),
            (date(2026, 3, 9), date(2026, 3, 10)),
        ];
        for &(a, b) in &samples {
            for &(c, d) in &samples {
                let booked = vec![booking("x", c, d, BookingStatus::Booked)];
                let proposed = vec![booking("y", a, b, BookingStatus::Booked)];
                assert_eq!(
                    overlaps(a, b, &booked),
                    overlaps(c, d, &proposed),
                    "asymmetric for {a}..{b} vs {c}..{d}"
                );
            }
        }
    }

    #[test]
    fn conflicting_booking_reports_first_match() {
        let bookings = vec![
            booking("gone", date(2026, 3, 10), date(2026, 3, 14), BookingStatus::Cancelled),
            booking("held", date(2026, 3, 12), date(2026, 3, 18), BookingStatus::Pending),
        ];
        let hit = conflicting_booking(date(2026, 3, 11), date(2026, 3, 12), &bookings);
        assert_eq!(hit.map(|b| b.id.as_str()), Some("held"));
    }

    #[test]
    fn empty_bookings_never_overlap() {
        assert!(!overlaps(date(2026, 3, 1), date(2026, 3, 2), &[]));
        assert!(booked_dates(&[]).is_empty());
    }
}
