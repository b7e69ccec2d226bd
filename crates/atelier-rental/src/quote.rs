//! Rental quotes and request validation for the add-to-cart step.

use chrono::NaiveDate;
use serde::Serialize;

use crate::availability::conflicting_booking;
use crate::booking::{Booking, ProposedRange};
use crate::policy::{rental_day_count, rental_total, RentalPolicy};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RentalError {
    #[error("Select both a start and an end date.")]
    IncompleteRange,

    #[error("The end date must not be before the start date.")]
    InvertedRange,

    #[error("Rentals must start on or after {earliest}.")]
    BeforeLeadTime { earliest: NaiveDate },

    #[error("Selected dates overlap with an existing booking.")]
    Overlap { booking_id: String },
}

/// Price breakdown shown under the calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RentalQuote {
    pub days: u32,
    pub daily_rate: u64,
    pub deposit: u64,
    pub total: u64,
}

impl RentalQuote {
    pub fn new(policy: &RentalPolicy, daily_rate: u64, range: &ProposedRange) -> Self {
        let days = rental_day_count(range);
        let deposit = policy.security_deposit(daily_rate);
        Self {
            days,
            daily_rate,
            deposit,
            total: rental_total(daily_rate, days, deposit),
        }
    }
}

/// Check a picked range before it is added to the cart.
///
/// Returns the inclusive `(start, end)` on success.
pub fn validate_request(
    range: &ProposedRange,
    today: NaiveDate,
    bookings: &[Booking],
    policy: &RentalPolicy,
) -> Result<(NaiveDate, NaiveDate), RentalError> {
    let (start, end) = range.bounds().ok_or(RentalError::IncompleteRange)?;
    if end < start {
        return Err(RentalError::InvertedRange);
    }

    let earliest = policy.minimum_start_date(today);
    if start < earliest {
        return Err(RentalError::BeforeLeadTime { earliest });
    }

    if let Some(booking) = conflicting_booking(start, end, bookings) {
        tracing::debug!(booking = %booking.id, %start, %end, "rental request overlaps booking");
        return Err(RentalError::Overlap {
            booking_id: booking.id.clone(),
        });
    }

    Ok((start, end))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::booking::BookingStatus;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn bookings() -> Vec<Booking> {
        vec![Booking {
            id: "rent-1".into(),
            product_id: "bridal-aurora".into(),
            user_id: "user-1".into(),
            start_date: date(2026, 3, 10),
            end_date: date(2026, 3, 14),
            status: BookingStatus::Booked,
        }]
    }

    #[test]
    fn quote_for_five_days() {
        let range = ProposedRange::new(date(2026, 3, 20), date(2026, 3, 24));
        let quote = RentalQuote::new(&RentalPolicy::default(), 100, &range);
        assert_eq!(
            quote,
            RentalQuote {
                days: 5,
                daily_rate: 100,
                deposit: 35,
                total: 535,
            }
        );
    }

    #[test]
    fn quote_for_open_range_is_zero() {
        let range = ProposedRange::open(date(2026, 3, 20));
        let quote = RentalQuote::new(&RentalPolicy::default(), 200, &range);
        assert_eq!(quote.days, 0);
        assert_eq!(quote.deposit, 70);
        assert_eq!(quote.total, 0);
    }

    #[test]
    fn valid_request_passes() {
        let range = ProposedRange::new(date(2026, 3, 15), date(2026, 3, 17));
        let result = validate_request(&range, date(2026, 3, 1), &bookings(), &RentalPolicy::default());
        assert_eq!(result, Ok((date(2026, 3, 15), date(2026, 3, 17))));
    }

    #[test]
    fn open_range_is_incomplete() {
        let range = ProposedRange::open(date(2026, 3, 15));
        let result = validate_request(&range, date(2026, 3, 1), &[], &RentalPolicy::default());
        assert_eq!(result, Err(RentalError::IncompleteRange));
    }

    #[test]
    fn inverted_range_is_rejected() {
        let range = ProposedRange::new(date(2026, 3, 17), date(2026, 3, 15));
        let result = validate_request(&range, date(2026, 3, 1), &[], &RentalPolicy::default());
        assert_eq!(result, Err(RentalError::InvertedRange));
    }

    #[test]
    fn start_inside_lead_time_is_rejected() {
        let range = ProposedRange::new(date(2026, 3, 2), date(2026, 3, 4));
        let result = validate_request(&range, date(2026, 3, 1), &[], &RentalPolicy::default());
        assert_eq!(
            result,
            Err(RentalError::BeforeLeadTime {
                earliest: date(2026, 3, 3)
            })
        );
    }

    #[test]
    fn start_exactly_at_lead_time_is_allowed() {
        let range = ProposedRange::new(date(2026, 3, 3), date(2026, 3, 4));
        let result = validate_request(&range, date(2026, 3, 1), &[], &RentalPolicy::default());
        assert!(result.is_ok());
    }

    #[test]
    fn overlapping_request_names_booking() {
        let range = ProposedRange::new(date(2026, 3, 12), date(2026, 3, 13));
        let err = validate_request(&range, date(2026, 3, 1), &bookings(), &RentalPolicy::default())
            .unwrap_err();
        assert_eq!(
            err,
            RentalError::Overlap {
                booking_id: "rent-1".into()
            }
        );
        assert_eq!(err.to_string(), "Selected dates overlap with an existing booking.");
    }
}
