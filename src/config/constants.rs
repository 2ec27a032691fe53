//! Configuration constants.
//!
//! Defaults for the HTTP surface, the calculation backend and the
//! spreadsheet recorder.

// HTTP server
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8000;
/// Allowed cross-origin value; `*` means any origin
pub const DEFAULT_FRONTEND_ORIGIN: &str = "*";

// Panchang query defaults (Jaipur)
pub const DEFAULT_LATITUDE: f64 = 26.9124;
pub const DEFAULT_LONGITUDE: f64 = 75.7873;
pub const DEFAULT_TIMEZONE: &str = "Asia/Kolkata";
pub const DEFAULT_CITY: &str = "Jaipur";

/// UTC offset used when the requested date has to be rebuilt as a
/// midnight time string.
pub const FALLBACK_UTC_OFFSET: &str = "+05:30";

// External services
pub const DEFAULT_VEDASTRO_API_URL: &str = "https://api.vedastro.org/api";
pub const DEFAULT_SHEETS_API_URL: &str = "https://sheets.googleapis.com";
/// Per-request timeout for outbound HTTP calls, in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const USER_AGENT: &str = concat!("panchang_service/", env!("CARGO_PKG_VERSION"));

// Spreadsheet layout
pub const WORKSHEET_NAME: &str = "PanchangCache";
pub const WORKSHEET_ROWS: u32 = 200;
pub const WORKSHEET_COLS: u32 = 20;

/// Header row written when the worksheet is created.
/// Appended rows follow the same column order.
pub const SHEET_HEADER: [&str; 11] = [
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
];

/// OAuth scopes requested for the service account
pub const GOOGLE_SCOPES: &[&str] = &[
    "https://spreadsheets.google.com/feeds",
    "https://www.googleapis.com/auth/drive",
];
/// Lifetime of the signed service-account assertion, in seconds
pub const JWT_LIFETIME_SECS: i64 = 3600;
pub const JWT_BEARER_GRANT_TYPE: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
