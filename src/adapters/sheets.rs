use crate::config::SheetConfig;
use crate::domain::range::FetchRange;
use crate::utils::error::{Result, SyncError};
use reqwest::Client;
use serde::Deserialize;
use url::Url;

/// Body of `GET .../values/{range}`. `values` is omitted when the range is empty.
#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Option<Vec<Vec<CellValue>>>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CellValue {
    String(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl CellValue {
    fn into_text(self) -> String {
        match self {
            CellValue::String(s) => s,
            CellValue::Int(i) => i.to_string(),
            CellValue::Float(f) => f.to_string(),
            CellValue::Bool(true) => "TRUE".to_string(),
            CellValue::Bool(false) => "FALSE".to_string(),
            CellValue::Null => String::new(),
        }
    }
}

pub struct SheetsClient {
    client: Client,
    base_url: Url,
    document_id: String,
    tab: String,
    api_key: String,
}

impl SheetsClient {
    pub fn new(sheet: &SheetConfig) -> Result<Self> {
        let base_url = Url::parse(sheet.base_url()).map_err(|e| {
            SyncError::InvalidConfigValueError {
                field: "sheet.base_url".to_string(),
                value: sheet.base_url().to_string(),
                reason: e.to_string(),
            }
        })?;

        let client = Client::builder().timeout(sheet.timeout()).build()?;

        Ok(Self {
            client,
            base_url,
            document_id: sheet.document_id.clone(),
            tab: sheet.tab.clone(),
            api_key: sheet.api_key.clone(),
        })
    }

    pub fn tab(&self) -> &str {
        &self.tab
    }

    /// `{base}/{document_id}/values/{Tab!A1:Z1000}?key=...`, with the range percent-encoded.
    pub fn values_url(&self, range: &FetchRange) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| SyncError::InvalidConfigValueError {
                field: "sheet.base_url".to_string(),
                value: self.base_url.to_string(),
                reason: "URL cannot be a base".to_string(),
            })?
            .pop_if_empty()
            .push(&self.document_id)
            .push("values")
            .push(&range.qualified(&self.tab));
        url.query_pairs_mut().append_pair("key", &self.api_key);
        Ok(url)
    }

    /// Fetches the raw cell grid. Zero rows (no header either) is an error.
    pub async fn fetch_values(&self, range: &FetchRange) -> Result<Vec<Vec<String>>> {
        let url = self.values_url(range)?;
        tracing::debug!(
            "Requesting range {} from sheet {}",
            range.qualified(&self.tab),
            self.document_id
        );

        let response = self.client.get(url).send().await?;
        let status = response.status();
        tracing::debug!("Sheets API response status: {}", status);

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SyncError::RemoteServiceError {
                status: status.as_u16(),
                body,
            });
        }

        let value_range: ValueRange = response.json().await?;
        let rows: Vec<Vec<String>> = value_range
            .values
            .unwrap_or_default()
            .into_iter()
            .map(|row| row.into_iter().map(CellValue::into_text).collect())
            .collect();

        if rows.is_empty() {
            return Err(SyncError::EmptyDataError {
                tab: self.tab.clone(),
            });
        }

        if range.is_saturated_by(&rows) {
            tracing::warn!(
                "⚠️ Sheet data reaches the edge of range {}; rows or columns beyond it are not synced",
                range
            );
        }

        Ok(rows)
    }

    /// Reads `A1:A1` to confirm the document, tab and key are usable.
    pub async fn probe(&self) -> Result<()> {
        let range = FetchRange::Bounded {
            first_column: 1,
            first_row: 1,
            last_column: 1,
            last_row: 1,
        };
        let response = self.client.get(self.values_url(&range)?).send().await?;
        let status = response.status();

        if status.is_success() {
            Ok(())
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(SyncError::RemoteServiceError {
                status: status.as_u16(),
                body: body.chars().take(200).collect(),
            })
        }
    }
}
