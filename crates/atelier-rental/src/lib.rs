//! Rental availability for bridal gowns.
//!
//! Given the bookings the booking service returns for one product, this
//! crate answers which calendar days are taken, whether a picked range
//! collides with an existing booking, and what the rental costs. Every
//! function is a pure query over the slice it is handed.

pub mod availability;
pub mod booking;
pub mod currency;
pub mod policy;
pub mod quote;

pub use availability::{booked_dates, conflicting_booking, overlaps, ranges_intersect};
pub use booking::{Booking, BookingStatus, ProposedRange};
pub use currency::format_currency;
pub use policy::{
    minimum_start_date, rental_day_count, rental_total, security_deposit, RentalPolicy,
};
pub use quote::{validate_request, RentalError, RentalQuote};
