//! `availability` and `quote`.

use std::fmt::Write as _;

use chrono::NaiveDate;

use atelier_common::{AtelierError, Result};
use atelier_config::schema::RentalConfig;
use atelier_rental::{
    booked_dates, conflicting_booking, format_currency, validate_request, Booking,
    ProposedRange, RentalPolicy, RentalQuote,
};

/// Booked days, one per line, then the verdict for `range` if given.
pub fn availability(bookings: &[Booking], range: Option<(NaiveDate, NaiveDate)>) -> String {
    let dates = booked_dates(bookings);
    let mut out = String::new();
    let _ = writeln!(out, "{} booked day(s)", dates.len());
    for date in &dates {
        let _ = writeln!(out, "  {date}");
    }

    if let Some((start, end)) = range {
        match conflicting_booking(start, end, bookings) {
            Some(booking) => {
                let _ = writeln!(out, "{start} to {end}: overlaps booking {}", booking.id);
            }
            None => {
                let _ = writeln!(out, "{start} to {end}: available");
            }
        }
    }
    out
}

pub struct QuoteRequest {
    pub daily_rate: u64,
    pub start: NaiveDate,
    pub end: Option<NaiveDate>,
    pub today: NaiveDate,
}

/// Validate the request and render the price breakdown.
pub fn quote(bookings: &[Booking], request: &QuoteRequest, config: &RentalConfig) -> Result<String> {
    let policy = RentalPolicy::from_config(config);
    let range = match request.end {
        Some(end) => ProposedRange::new(request.start, end),
        None => ProposedRange::open(request.start),
    };

    let (start, end) = validate_request(&range, request.today, bookings, &policy)
        .map_err(|e| AtelierError::Rental(e.to_string()))?;
    let quote = RentalQuote::new(&policy, request.daily_rate, &range);
    tracing::info!(%start, %end, days = quote.days, total = quote.total, "rental quoted");

    let symbol = config.currency_symbol.as_str();
    let mut out = String::new();
    let _ = writeln!(out, "{start} to {end} ({} day(s))", quote.days);
    let _ = writeln!(
        out,
        "  rental   {} x {}",
        format_currency(quote.daily_rate, symbol),
        quote.days
    );
    let _ = writeln!(out, "  deposit  {}", format_currency(quote.deposit, symbol));
    let _ = writeln!(out, "  total    {}", format_currency(quote.total, symbol));
    Ok(out)
}
