use std::sync::Arc;
use std::time::Duration;

use reqwest::Url;
use serde::Deserialize;
use tracing::debug;

use crate::infra::google::{api_failure, ApiFailure, FailureKind};
use crate::usecase::ports::credentials::CredentialError;
use crate::usecase::ports::credentials::TokenProvider;
use crate::usecase::ports::source::{SourceError, TabularSource};

pub const SHEETS_BASE_URL: &str = "https://sheets.googleapis.com";

#[derive(Debug, Default, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<String>>,
}

/// A1 range covering one whole worksheet row; `row` is zero-based.
pub fn row_range(worksheet: &str, row: usize) -> String {
    let n = row + 1;
    format!("{}!{n}:{n}", quote_sheet_name(worksheet))
}

pub fn quote_sheet_name(worksheet: &str) -> String {
    format!("'{}'", worksheet.replace('\'', "''"))
}

pub fn values_url(
    base_url: &str,
    spreadsheet_id: &str,
    range: &str,
) -> Result<Url, SourceError> {
    let mut url = Url::parse(base_url)
        .map_err(|err| SourceError::Unavailable(format!("invalid sheets url: {err}")))?;
    url.path_segments_mut()
        .map_err(|_| SourceError::Unavailable("sheets url cannot be a base".to_string()))?
        .pop_if_empty()
        .extend(["v4", "spreadsheets", spreadsheet_id, "values", range]);
    Ok(url)
}

pub fn source_error(detail: String, failure: &ApiFailure) -> SourceError {
    match failure.kind() {
        FailureKind::NotFound => SourceError::NotFound(detail),
        FailureKind::Permission => SourceError::Permission(detail),
        FailureKind::Unauthorized => {
            SourceError::Credential(CredentialError::Rejected(failure.to_string()))
        }
        FailureKind::Other => SourceError::Unavailable(detail),
    }
}

pub struct GoogleSheetsSource {
    client: reqwest::blocking::Client,
    auth: Arc<dyn TokenProvider>,
    spreadsheet_id: String,
    worksheet: String,
}

impl GoogleSheetsSource {
    pub fn new(
        auth: Arc<dyn TokenProvider>,
        spreadsheet_id: impl Into<String>,
        worksheet: impl Into<String>,
    ) -> Result<Self, SourceError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|err| SourceError::Unavailable(err.to_string()))?;
        Ok(Self {
            client,
            auth,
            spreadsheet_id: spreadsheet_id.into(),
            worksheet: worksheet.into(),
        })
    }

    fn fetch(&self, range: &str) -> Result<Vec<Vec<String>>, SourceError> {
        let url = values_url(SHEETS_BASE_URL, &self.spreadsheet_id, range)?;
        let token = self.auth.access_token()?;
        debug!(%url, "fetching sheet values");
        let response = self
            .client
            .get(url)
            .bearer_auth(token)
            .send()
            .map_err(|err| SourceError::Unavailable(err.to_string()))?;
        if !response.status().is_success() {
            let failure = api_failure(response);
            let detail = format!("{} ({failure})", self.describe());
            return Err(source_error(detail, &failure));
        }
        let body: ValueRange = response
            .json()
            .map_err(|err| SourceError::Unavailable(format!("invalid values response: {err}")))?;
        Ok(body.values)
    }
}

impl TabularSource for GoogleSheetsSource {
    fn describe(&self) -> String {
        format!("sheet {}#{}", self.spreadsheet_id, self.worksheet)
    }

    fn all_values(&self) -> Result<Vec<Vec<String>>, SourceError> {
        self.fetch(&quote_sheet_name(&self.worksheet))
    }

    fn row_values(&self, row: usize) -> Result<Vec<String>, SourceError> {
        let values = self.fetch(&row_range(&self.worksheet, row))?;
        Ok(values.into_iter().next().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_range_is_one_based() {
        assert_eq!(row_range("Sheet1", 0), "'Sheet1'!1:1");
        assert_eq!(row_range("Sheet1", 41), "'Sheet1'!42:42");
    }

    #[test]
    fn sheet_names_with_quotes_are_escaped() {
        assert_eq!(quote_sheet_name("Bob's data"), "'Bob''s data'");
    }

    #[test]
    fn values_url_encodes_range_segment() {
        let url = values_url(SHEETS_BASE_URL, "sheet-id", "'My Sheet'!2:2")
            .expect("url should build");

        assert_eq!(
            url.as_str(),
            "https://sheets.googleapis.com/v4/spreadsheets/sheet-id/values/'My%20Sheet'!2:2"
        );
    }

    #[test]
    fn http_statuses_map_to_source_errors() {
        let detail = || "sheet s#Sheet1".to_string();

        assert_eq!(
            source_error(detail(), &ApiFailure::from_body(404, "")),
            SourceError::NotFound(detail())
        );
        assert_eq!(
            source_error(detail(), &ApiFailure::from_body(403, "")),
            SourceError::Permission(detail())
        );
        assert!(matches!(
            source_error(detail(), &ApiFailure::from_body(401, "")),
            SourceError::Credential(CredentialError::Rejected(_))
        ));
        assert_eq!(
            source_error(detail(), &ApiFailure::from_body(503, "")),
            SourceError::Unavailable(detail())
        );
    }

    #[test]
    fn value_range_tolerates_empty_sheet() {
        let body: ValueRange = serde_json::from_str(r#"{"range":"Sheet1!A1:Z1000","majorDimension":"ROWS"}"#)
            .expect("empty value range should parse");

        assert!(body.values.is_empty());
    }
}
