//! Booking records supplied by the booking service, and the range a
//! customer is picking.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Lifecycle state of an existing booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Booked,
    Active,
    Returned,
    Cancelled,
}

impl BookingStatus {
    /// Every status except `Cancelled` holds the gown for its dates.
    pub fn blocks_dates(self) -> bool {
        self != BookingStatus::Cancelled
    }
}

/// An existing rental of one product. Read-only from this crate's side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    pub id: String,
    pub product_id: String,
    #[serde(default)]
    pub user_id: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: BookingStatus,
}

impl Booking {
    /// Inclusive `(start, end)` if this booking holds dates.
    ///
    /// Cancelled bookings and records whose end precedes their start hold
    /// nothing.
    pub fn blocked_span(&self) -> Option<(NaiveDate, NaiveDate)> {
        if !self.status.blocks_dates() {
            return None;
        }
        if self.end_date < self.start_date {
            tracing::warn!(
                booking = %self.id,
                start = %self.start_date,
                end = %self.end_date,
                "ignoring booking with end before start"
            );
            return None;
        }
        Some((self.start_date, self.end_date))
    }
}

/// Dates picked in the calendar. `end` stays empty until the second click.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposedRange {
    pub start: NaiveDate,
    #[serde(default)]
    pub end: Option<NaiveDate>,
}

impl ProposedRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start,
            end: Some(end),
        }
    }

    pub fn open(start: NaiveDate) -> Self {
        Self { start, end: None }
    }

    /// `(start, end)` once both ends are chosen.
    pub fn bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        self.end.map(|end| (self.start, end))
    }
}
