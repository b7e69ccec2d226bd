//! Deposit, lead-time, and pricing rules.

use atelier_config::schema::RentalConfig;
use chrono::{Days, NaiveDate};

use crate::booking::ProposedRange;

const BASIS_POINTS: u64 = 10_000;

/// Storefront rental rules.
///
/// The deposit rate is held in basis points so that `ceil(price × rate)` is
/// computed exactly in integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RentalPolicy {
    pub deposit_basis_points: u64,
    pub lead_time_days: u32,
}

impl Default for RentalPolicy {
    fn default() -> Self {
        Self {
            deposit_basis_points: 3_500,
            lead_time_days: 2,
        }
    }
}

impl RentalPolicy {
    pub fn from_config(config: &RentalConfig) -> Self {
        let rate = config.deposit_rate.clamp(0.0, 1.0);
        Self {
            deposit_basis_points: (rate * BASIS_POINTS as f64).round() as u64,
            lead_time_days: config.lead_time_days,
        }
    }

    /// Earliest day a rental may begin when booked on `today`.
    pub fn minimum_start_date(&self, today: NaiveDate) -> NaiveDate {
        today
            .checked_add_days(Days::new(u64::from(self.lead_time_days)))
            .unwrap_or(NaiveDate::MAX)
    }

    /// Refundable deposit for a rental price, rounded up to a whole unit.
    pub fn security_deposit(&self, rental_price: u64) -> u64 {
        rental_price
            .saturating_mul(self.deposit_basis_points)
            .div_ceil(BASIS_POINTS)
    }
}

/// `today + 2 days` under the default policy.
pub fn minimum_start_date(today: NaiveDate) -> NaiveDate {
    RentalPolicy::default().minimum_start_date(today)
}

/// `ceil(rental_price × 0.35)` under the default policy.
pub fn security_deposit(rental_price: u64) -> u64 {
    RentalPolicy::default().security_deposit(rental_price)
}

/// Days in the range, counting both ends. An open or inverted range is 0.
pub fn rental_day_count(range: &ProposedRange) -> u32 {
    match range.bounds() {
        Some((start, end)) if end >= start => {
            let days = (end - start).num_days() + 1;
            u32::try_from(days).unwrap_or(u32::MAX)
        }
        _ => 0,
    }
}

/// `daily_rate × day_count + deposit`, or 0 when no day is selected.
pub fn rental_total(daily_rate: u64, day_count: u32, deposit: u64) -> u64 {
    if day_count < 1 {
        return 0;
    }
    daily_rate
        .saturating_mul(u64::from(day_count))
        .saturating_add(deposit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn minimum_start_is_two_days_out() {
        assert_eq!(minimum_start_date(date(2026, 3, 10)), date(2026, 3, 12));
        assert_eq!(minimum_start_date(date(2026, 2, 27)), date(2026, 3, 1));
        assert_eq!(minimum_start_date(date(2026, 12, 31)), date(2027, 1, 2));
    }

    #[test]
    fn minimum_start_holds_for_every_day_of_a_year() {
        let mut today = date(2028, 1, 1);
        while today.year() == 2028 {
            assert_eq!((minimum_start_date(today) - today).num_days(), 2);
            today = today.succ_opt().unwrap();
        }
    }

    #[test]
    fn minimum_start_saturates_at_max_date() {
        assert_eq!(minimum_start_date(NaiveDate::MAX), NaiveDate::MAX);
    }

    #[test]
    fn deposit_rounds_up() {
        assert_eq!(security_deposit(200), 70);
        assert_eq!(security_deposit(201), 71);
        assert_eq!(security_deposit(0), 0);
        assert_eq!(security_deposit(1), 1);
        assert_eq!(security_deposit(1_000), 350);
    }

    #[test]
    fn deposit_from_config_rate() {
        let policy = RentalPolicy::from_config(&RentalConfig {
            deposit_rate: 0.5,
            lead_time_days: 5,
            currency_symbol: "$".into(),
        });
        assert_eq!(policy.deposit_basis_points, 5_000);
        assert_eq!(policy.security_deposit(101), 51);
        assert_eq!(policy.minimum_start_date(date(2026, 3, 10)), date(2026, 3, 15));
    }

    #[test]
    fn default_config_matches_default_policy() {
        let policy = RentalPolicy::from_config(&RentalConfig::default());
        assert_eq!(policy, RentalPolicy::default());
    }

    #[test]
    fn day_count_is_inclusive() {
        let range = ProposedRange::new(date(2026, 3, 10), date(2026, 3, 14));
        assert_eq!(rental_day_count(&range), 5);
        let same_day = ProposedRange::new(date(2026, 3, 10), date(2026, 3, 10));
        assert_eq!(rental_day_count(&same_day), 1);
    }

    #[test]
    fn day_count_of_open_range_is_zero() {
        assert_eq!(rental_day_count(&ProposedRange::open(date(2026, 3, 10))), 0);
    }

    #[test]
    fn day_count_of_inverted_range_is_zero() {
        let range = ProposedRange::new(date(2026, 3, 14), date(2026, 3, 10));
        assert_eq!(rental_day_count(&range), 0);
    }

    #[test]
    fn total_adds_deposit_once() {
        assert_eq!(rental_total(100, 5, 35), 535);
        assert_eq!(rental_total(100, 1, 35), 135);
    }

    #[test]
    fn total_without_days_is_zero() {
        assert_eq!(rental_total(100, 0, 35), 0);
    }
}
