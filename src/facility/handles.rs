//! Location and time handles passed to calculations.

use std::fmt;

use chrono::{DateTime, FixedOffset};

use crate::error_handling::HandleError;

/// Accepted time layouts besides RFC 3339, tried in order.
const TIME_FORMATS: &[&str] = &["%H:%M %d/%m/%Y %:z", "%H:%M %Y-%m-%d %:z"];

/// Layout used when a time is rendered back for the calculation backend.
const DISPLAY_FORMAT: &str = "%H:%M %d/%m/%Y %:z";

/// A named place with validated coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct GeoLocation {
    name: String,
    longitude: f64,
    latitude: f64,
}

impl GeoLocation {
    /// Builds a location from a place name, longitude and latitude.
    ///
    /// Fails when either coordinate is not finite or lies outside its range
    /// (longitude in [-180, 180], latitude in [-90, 90]).
    pub fn new(name: impl Into<String>, longitude: f64, latitude: f64) -> Result<Self, HandleError> {
        let name = name.into();
        check_axis(&name, "longitude", longitude, 180.0)?;
        check_axis(&name, "latitude", latitude, 90.0)?;
        Ok(Self {
            name,
            longitude,
            latitude,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }
}

fn check_axis(name: &str, axis: &'static str, value: f64, limit: f64) -> Result<(), HandleError> {
    if value.is_finite() && (-limit..=limit).contains(&value) {
        Ok(())
    } else {
        Err(HandleError::Coordinate {
            name: name.to_string(),
            axis,
            value,
        })
    }
}

/// An instant with a fixed UTC offset, bound to the place it is observed from.
#[derive(Debug, Clone, PartialEq)]
pub struct TimePoint {
    instant: DateTime<FixedOffset>,
    location: GeoLocation,
}

impl TimePoint {
    /// Parses a time string for `location`.
    ///
    /// Accepts `HH:MM DD/MM/YYYY ±HH:MM`, `HH:MM YYYY-MM-DD ±HH:MM` and RFC 3339.
    /// A bare date such as `2025-12-02` is rejected; callers rebuild it as a
    /// midnight time string.
    pub fn parse(text: &str, location: &GeoLocation) -> Result<Self, HandleError> {
        let trimmed = text.trim();
        let instant = TIME_FORMATS
            .iter()
            .find_map(|format| DateTime::parse_from_str(trimmed, format).ok())
            .or_else(|| DateTime::parse_from_rfc3339(trimmed).ok())
            .ok_or_else(|| HandleError::Time(text.to_string()))?;

        Ok(Self {
            instant,
            location: location.clone(),
        })
    }

    pub fn instant(&self) -> DateTime<FixedOffset> {
        self.instant
    }

    pub fn location(&self) -> &GeoLocation {
        &self.location
    }
}

impl fmt::Display for TimePoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.instant.format(DISPLAY_FORMAT))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    fn jaipur() -> GeoLocation {
        GeoLocation::new("Jaipur", 75.7873, 26.9124).expect("valid coordinates")
    }

    #[test]
    fn test_geo_location_accepts_valid_coordinates() {
        let geo = jaipur();
        assert_eq!(geo.name(), "Jaipur");
        assert_eq!(geo.longitude(), 75.7873);
        assert_eq!(geo.latitude(), 26.9124);
    }

    #[test]
    fn test_geo_location_rejects_out_of_range_latitude() {
        let err = GeoLocation::new("Somewhere", 10.0, 120.0).unwrap_err();
        assert!(matches!(
            err,
            HandleError::Coordinate {
                axis: "latitude",
                ..
            }
        ));
    }

    #[test]
    fn test_geo_location_rejects_non_finite() {
        assert!(GeoLocation::new("Nowhere", f64::NAN, 0.0).is_err());
        assert!(GeoLocation::new("Nowhere", 0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn test_geo_location_swapped_order_may_fail() {
        // Longitude 150 is not a valid latitude
        assert!(GeoLocation::new("Sydney", -33.86, 151.2).is_err());
        assert!(GeoLocation::new("Sydney", 151.2, -33.86).is_ok());
    }

    #[test]
    fn test_time_point_rejects_bare_iso_date() {
        assert_eq!(
            TimePoint::parse("2025-12-02", &jaipur()).unwrap_err(),
            HandleError::Time("2025-12-02".to_string())
        );
    }

    #[test]
    fn test_time_error_lists_accepted_layouts() {
        let message = TimePoint::parse("tomorrow", &jaipur())
            .unwrap_err()
            .to_string();
        assert!(message.contains("HH:MM DD/MM/YYYY +HH:MM"));
        assert!(message.contains("HH:MM YYYY-MM-DD +HH:MM"));
        assert!(message.contains("RFC 3339"));

        for accepted in [
            "00:00 02/12/2025 +05:30",
            "00:00 2025-12-02 +05:30",
            "2025-12-02T00:00:00+05:30",
        ] {
            assert!(TimePoint::parse(accepted, &jaipur()).is_ok(), "{accepted}");
        }
    }

    #[test]
    fn test_time_point_parses_midnight_fallback() {
        let t = TimePoint::parse("00:00 2025-12-02 +05:30", &jaipur()).expect("should parse");
        assert_eq!(t.instant().day(), 2);
        assert_eq!(t.instant().month(), 12);
        assert_eq!(t.instant().hour(), 0);
        assert_eq!(t.instant().offset().local_minus_utc(), 5 * 3600 + 30 * 60);
        assert_eq!(t.to_string(), "00:00 02/12/2025 +05:30");
    }

    #[test]
    fn test_time_point_parses_native_format() {
        let t = TimePoint::parse("18:45 31/01/2024 +08:00", &jaipur()).expect("should parse");
        assert_eq!(t.to_string(), "18:45 31/01/2024 +08:00");
        assert_eq!(t.location().name(), "Jaipur");
    }

    #[test]
    fn test_time_point_parses_rfc3339() {
        let t = TimePoint::parse("2025-01-01T06:30:00+05:30", &jaipur()).expect("should parse");
        assert_eq!(t.to_string(), "06:30 01/01/2025 +05:30");
    }

    #[test]
    fn test_time_point_rejects_garbage() {
        assert!(TimePoint::parse("not a date", &jaipur()).is_err());
        assert!(TimePoint::parse("00:00 not a date +05:30", &jaipur()).is_err());
    }
}
