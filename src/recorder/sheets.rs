//! Minimal Google Sheets v4 REST client.
//!
//! Covers the calls the recorder makes: list worksheet titles, add a
//! worksheet, write a range and append a row.

use serde::Deserialize;
use serde_json::json;
use url::Url;

use crate::error_handling::{truncate_body, RecorderError};

#[derive(Debug, Deserialize)]
struct SpreadsheetMeta {
    #[serde(default)]
    sheets: Vec<SheetMeta>,
}

#[derive(Debug, Deserialize)]
struct SheetMeta {
    properties: SheetProperties,
}

#[derive(Debug, Deserialize)]
struct SheetProperties {
    title: String,
}

/// An authorized handle on one spreadsheet.
pub struct Spreadsheet<'a> {
    client: &'a reqwest::Client,
    api_base: &'a str,
    spreadsheet_id: &'a str,
    token: String,
}

impl<'a> Spreadsheet<'a> {
    pub fn new(
        client: &'a reqwest::Client,
        api_base: &'a str,
        spreadsheet_id: &'a str,
        token: String,
    ) -> Self {
        Self {
            client,
            api_base,
            spreadsheet_id,
            token,
        }
    }

    /// `{base}/v4/spreadsheets/{id}{suffix}` followed by `extra` segments.
    ///
    /// `suffix` is glued to the id (`:batchUpdate`); segments are encoded.
    fn url(&self, suffix: &str, extra: &[&str]) -> Result<Url, RecorderError> {
        let mut url =
            Url::parse(self.api_base).map_err(|e| RecorderError::Url(format!("{}: {}", self.api_base, e)))?;
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| RecorderError::Url(self.api_base.to_string()))?;
            segments
                .pop_if_empty()
                .push("v4")
                .push("spreadsheets")
                .push(&format!("{}{}", self.spreadsheet_id, suffix));
            segments.extend(extra);
        }
        Ok(url)
    }

    /// Titles of all worksheets; fails if the spreadsheet cannot be opened.
    pub async fn worksheet_titles(&self) -> Result<Vec<String>, RecorderError> {
        let mut url = self.url("", &[])?;
        url.query_pairs_mut().append_pair("fields", "sheets.properties.title");

        let response = self.client.get(url).bearer_auth(&self.token).send().await?;
        let meta: SpreadsheetMeta = check("open spreadsheet", response).await?.json().await?;
        Ok(meta.sheets.into_iter().map(|s| s.properties.title).collect())
    }

    /// Adds a worksheet with the given grid size.
    pub async fn add_worksheet(&self, title: &str, rows: u32, cols: u32) -> Result<(), RecorderError> {
        let url = self.url(":batchUpdate", &[])?;
        let body = json!({
            "requests": [{
                "addSheet": {
                    "properties": {
                        "title": title,
                        "gridProperties": {"rowCount": rows, "columnCount": cols}
                    }
                }
            }]
        });
        let response = self
            .client
            .post(url)
            .bearer_auth(&self.token)
            .json(&body)
            .send()
            .await?;
        check("add worksheet", response).await?;
        Ok(())
    }

    /// Overwrites `range` (A1 notation) with one row.
    pub async fn write_row(&self, range: &str, row: &[String]) -> Result<(), RecorderError> {
        let mut url = self.url("", &["values", range])?;
        url.query_pairs_mut().append_pair("valueInputOption", "RAW");
        let response = self
            .client
            .put(url)
            .bearer_auth(&self.token)
            .json(&json!({"range": range, "majorDimension": "ROWS", "values": [row]}))
            .send()
            .await?;
        check("write header", response).await?;
        Ok(())
    }

    /// Appends one row after the last non-empty row of `worksheet`.
    pub async fn append_row(&self, worksheet: &str, row: &[String]) -> Result<(), RecorderError> {
        let range = format!("{}!A1", worksheet);
        let mut url = self.url("", &["values", &format!("{}:append", range)])?;
        url.query_pairs_mut()
            .append_pair("valueInputOption", "RAW")
            .append_pair("insertDataOption", "INSERT_ROWS");
        let response = self
            .client
            .post(url)
            .bearer_auth(&self.token)
            .json(&json!({"range": range, "majorDimension": "ROWS", "values": [row]}))
            .send()
            .await?;
        check("append row", response).await?;
        Ok(())
    }
}

async fn check(
    operation: &'static str,
    response: reqwest::Response,
) -> Result<reqwest::Response, RecorderError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(RecorderError::Api {
        operation,
        status: status.as_u16(),
        body: truncate_body(&body),
    })
}
