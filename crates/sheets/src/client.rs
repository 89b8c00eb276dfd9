//! Google Sheets `values.get` client

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Error, Debug)]
pub enum SheetsError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Sheets API error: {status} - {message}")]
    Api { status: u16, message: String },
}

/// How many times a single range fetch is attempted before giving up
const MAX_ATTEMPTS: u32 = 5;

/// Google Sheets API client, reading ranges with a pre-minted bearer token
pub struct SheetsClient {
    client: reqwest::Client,
    token: String,
}

/// `values.get` response body. `values` is absent when the range is empty.
#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<String>>,
}

impl SheetsClient {
    pub fn new(token: String) -> Self {
        let client = reqwest::Client::new();
        Self { client, token }
    }

    fn headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        if let Ok(val) = HeaderValue::from_str(&format!("Bearer {}", self.token)) {
            headers.insert(AUTHORIZATION, val);
        }
        headers
    }

    /// Fetch the rows of one A1 range, retrying transient upstream errors
    /// with a short backoff.
    pub async fn get_values(
        &self,
        spreadsheet_id: &str,
        a1_range: &str,
    ) -> Result<Vec<Vec<String>>, SheetsError> {
        // Tab names routinely carry spaces
        let range = a1_range.replace(' ', "%20");
        let url = format!(
            "https://sheets.googleapis.com/v4/spreadsheets/{}/values/{}",
            spreadsheet_id, range
        );

        let mut attempt = 1u32;
        loop {
            match self.get_values_once(&url).await {
                Ok(values) => return Ok(values),
                Err(e) if attempt < MAX_ATTEMPTS && is_transient(&e) => {
                    warn!(
                        "Sheets fetch attempt {}/{} failed ({}), retrying",
                        attempt, MAX_ATTEMPTS, e
                    );
                    tokio::time::sleep(Duration::from_millis(250 * 2u64.pow(attempt - 1))).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn get_values_once(&self, url: &str) -> Result<Vec<Vec<String>>, SheetsError> {
        debug!("GET {}", url);
        let resp = self.client.get(url).headers(self.headers()).send().await?;

        let status = resp.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(SheetsError::NotFound(url.to_string()));
        }
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(SheetsError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: ValueRange = resp.json().await?;
        Ok(body.values)
    }
}

fn is_transient(error: &SheetsError) -> bool {
    match error {
        SheetsError::Http(e) => e.is_timeout() || e.is_connect() || e.is_request(),
        SheetsError::Api { status, .. } => *status == 429 || *status >= 500,
        SheetsError::NotFound(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = SheetsClient::new("tok".to_string());
        assert_eq!(client.token, "tok");
    }

    #[test]
    fn test_transient_classification() {
        assert!(is_transient(&SheetsError::Api {
            status: 503,
            message: String::new()
        }));
        assert!(is_transient(&SheetsError::Api {
            status: 429,
            message: String::new()
        }));
        assert!(!is_transient(&SheetsError::Api {
            status: 400,
            message: String::new()
        }));
        assert!(!is_transient(&SheetsError::NotFound("x".to_string())));
    }

    #[test]
    fn test_empty_range_deserializes_to_no_rows() {
        let body: ValueRange = serde_json::from_str(r#"{"range": "Dashboard!A1:D20"}"#).unwrap();
        assert!(body.values.is_empty());
    }
}
