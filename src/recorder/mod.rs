//! Best-effort result persistence.
//!
//! When a spreadsheet id and a service-account document are configured, each
//! assembled result is appended as one row to the `PanchangCache` worksheet,
//! which is created with a header row on first use. Every failure is logged
//! and reported as `false`; nothing here can fail a request.

mod auth;
mod row;
mod sheets;

use async_trait::async_trait;

use crate::config::{Config, WORKSHEET_COLS, WORKSHEET_NAME, WORKSHEET_ROWS};
use crate::error_handling::RecorderError;
use crate::panchang::PanchangResult;

pub use auth::ServiceAccountKey;
pub use row::{header_row, result_row};
use sheets::Spreadsheet;

/// Destination for assembled results.
#[async_trait]
pub trait ResultRecorder: Send + Sync {
    /// Persists `result`; returns whether a row was written.
    async fn record(&self, result: &PanchangResult) -> bool;
}

#[derive(Debug, Clone)]
struct SheetTarget {
    spreadsheet_id: String,
    credentials_json: String,
}

/// Appends results to a Google Sheets worksheet.
#[derive(Debug, Clone)]
pub struct SheetRecorder {
    client: reqwest::Client,
    api_base: String,
    target: Option<SheetTarget>,
}

impl SheetRecorder {
    /// Recorder for the configured spreadsheet; disabled unless both the id
    /// and the credentials are set.
    pub fn from_config(config: &Config, client: reqwest::Client) -> Self {
        let target = config
            .sheet_settings()
            .map(|(spreadsheet_id, credentials_json)| SheetTarget {
                spreadsheet_id: spreadsheet_id.to_string(),
                credentials_json: credentials_json.to_string(),
            });
        Self {
            client,
            api_base: config.sheets_api_url.clone(),
            target,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.target.is_some()
    }

    async fn write(&self, target: &SheetTarget, result: &PanchangResult) -> Result<(), RecorderError> {
        let key = ServiceAccountKey::from_json(&target.credentials_json)?;
        let token = key.access_token(&self.client).await?;
        let sheet = Spreadsheet::new(&self.client, &self.api_base, &target.spreadsheet_id, token);

        let titles = sheet.worksheet_titles().await?;
        if !titles.iter().any(|t| t == WORKSHEET_NAME) {
            log::info!("Creating worksheet {}", WORKSHEET_NAME);
            sheet
                .add_worksheet(WORKSHEET_NAME, WORKSHEET_ROWS, WORKSHEET_COLS)
                .await?;
            sheet
                .write_row(&format!("{}!A1", WORKSHEET_NAME), &header_row())
                .await?;
        }

        let updated_at = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
        sheet
            .append_row(WORKSHEET_NAME, &result_row(result, &updated_at))
            .await
    }
}

#[async_trait]
impl ResultRecorder for SheetRecorder {
    async fn record(&self, result: &PanchangResult) -> bool {
        let Some(target) = &self.target else {
            log::debug!("Spreadsheet not configured; skipping write");
            return false;
        };
        match self.write(target, result).await {
            Ok(()) => {
                log::debug!("Appended {} / {} to {}", result.date, result.city, WORKSHEET_NAME);
                true
            }
            Err(e) => {
                log::error!("write_to_sheet error: {}", e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unconfigured_recorder_writes_nothing() {
        let recorder = SheetRecorder::from_config(&Config::default(), reqwest::Client::new());
        assert!(!recorder.is_configured());
        let result = PanchangResult::new("2025-12-02", "Jaipur", 26.9124, 75.7873);
        assert!(!recorder.record(&result).await);
    }

    #[tokio::test]
    async fn test_invalid_credentials_report_false() {
        let config = Config {
            gsheet_id: Some("sheet".to_string()),
            google_service_account_json: Some("{not json".to_string()),
            // Unroutable; must never be contacted because parsing fails first
            sheets_api_url: "http://127.0.0.1:9".to_string(),
            ..Default::default()
        };
        let recorder = SheetRecorder::from_config(&config, reqwest::Client::new());
        assert!(recorder.is_configured());
        let result = PanchangResult::new("2025-12-02", "Jaipur", 26.9124, 75.7873);
        assert!(!recorder.record(&result).await);
    }
}
