//! Non-interactive subcommands. Each returns its report as text so the
//! caller decides where it goes.

pub mod convert;
pub mod fetch;
pub mod rental;

use std::path::Path;

use atelier_common::{AtelierError, Result};
use atelier_rental::Booking;

/// Read a JSON array of bookings as the booking service returns them.
pub fn load_bookings(path: &Path) -> Result<Vec<Booking>> {
    let raw = std::fs::read_to_string(path)?;
    let bookings: Vec<Booking> = serde_json::from_str(&raw)
        .map_err(|e| AtelierError::Other(format!("invalid bookings file {}: {e}", path.display())))?;
    tracing::debug!(path = %path.display(), count = bookings.len(), "bookings loaded");
    Ok(bookings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_bookings_from_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bookings.json");
        std::fs::write(
            &path,
            r#"[{"id":"b1","product_id":"gown-7","start_date":"2026-03-10","end_date":"2026-03-12","status":"booked"}]"#,
        )
        .unwrap();

        let bookings = load_bookings(&path).unwrap();
        assert_eq!(bookings.len(), 1);
        assert_eq!(bookings[0].id, "b1");
        assert!(bookings[0].user_id.is_empty());
    }

    #[test]
    fn malformed_bookings_name_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bookings.json");
        std::fs::write(&path, "{not json").unwrap();

        let err = load_bookings(&path).unwrap_err();
        assert!(err.to_string().contains("bookings.json"));
    }

    #[test]
    fn missing_bookings_file_is_io_error() {
        let err = load_bookings(Path::new("/tmp/atelier_missing_bookings.json")).unwrap_err();
        assert!(matches!(err, AtelierError::Io(_)));
    }
}
