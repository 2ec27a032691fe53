//! Spreadsheet row layout.

use crate::config::SHEET_HEADER;
use crate::panchang::{PanchangResult, Quantity};

/// The header row as owned strings.
pub fn header_row() -> Vec<String> {
    SHEET_HEADER.iter().map(|s| s.to_string()).collect()
}

/// One row in [`SHEET_HEADER`] column order. Missing quantities are empty cells.
pub fn result_row(result: &PanchangResult, updated_at: &str) -> Vec<String> {
    let quantity = |q: Quantity| result.get(q).unwrap_or_default().to_string();
    vec![
        result.date.clone(),
        result.city.clone(),
        quantity(Quantity::Tithi),
        quantity(Quantity::Nakshatra),
        quantity(Quantity::Yoga),
        quantity(Quantity::Karan),
        quantity(Quantity::RahuKaal),
        quantity(Quantity::GulikaKaal),
        quantity(Quantity::Abhijit),
        result.raw.to_json_string(),
        updated_at.to_string(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_row() {
        assert_eq!(
            header_row(),
            vec![
                "date",
                "city",
                "tithi",
                "nakshatra",
                "yoga",
                "karan",
                "rahu_kaal",
                "gulika_kaal",
                "abhijit",
                "raw_json",
                "updated_at",
            ]
        );
    }

    #[test]
    fn test_result_row_matches_header() {
        let mut result = PanchangResult::new("2025-12-02", "Jaipur", 26.9124, 75.7873);
        result.set(Quantity::Tithi, Some("Pratipada".to_string()));
        result.set(Quantity::Abhijit, Some("12:01-12:49".to_string()));
        result.raw.record("tithi_obj", "Tithi(Pratipada)");
        result.raw.record("karan_error", "boom");

        let row = result_row(&result, "2025-12-02 10:00:00");
        assert_eq!(row.len(), SHEET_HEADER.len());
        assert_eq!(row[0], "2025-12-02");
        assert_eq!(row[1], "Jaipur");
        assert_eq!(row[2], "Pratipada");
        assert_eq!(row[3], "");
        assert_eq!(row[8], "12:01-12:49");
        assert_eq!(
            row[9],
            r#"{"tithi_obj":"Tithi(Pratipada)","karan_error":"boom"}"#
        );
        assert_eq!(row[10], "2025-12-02 10:00:00");
    }
}
