#[cfg(feature = "cli")]
pub mod cli;
pub mod env;
pub mod toml_config;

use crate::app::pipelines::sheet_pipeline::planned_artifact_names;
use crate::domain::model::Destination;
use crate::domain::range::FetchRange;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_SHEETS_BASE_URL: &str = "https://sheets.googleapis.com/v4/spreadsheets";
pub const DEFAULT_COUNTRY_COLUMN: &str = "Country";

/// Everything a run needs, built once at startup and only ever borrowed afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncConfig {
    pub sheet: SheetConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub destinations: Vec<Destination>,
    pub cdn: Option<CdnConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SheetConfig {
    pub document_id: String,
    #[serde(default = "default_tab")]
    pub tab: String,
    pub api_key: String,
    /// A1 notation; ignored when `whole_sheet` is set.
    pub range: Option<String>,
    #[serde(default)]
    pub whole_sheet: bool,
    pub base_url: Option<String>,
    pub timeout_seconds: Option<u64>,
    #[serde(default)]
    pub duplicate_headers: DuplicateHeaderPolicy,
    pub country_column: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicateHeaderPolicy {
    #[default]
    Reject,
    /// The column keeps its first position, the rightmost duplicate supplies the value.
    LastWins,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_output_dir")]
    pub dir: String,
    #[serde(default = "default_prefix")]
    pub prefix: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
            prefix: default_prefix(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CdnConfig {
    pub github_username: String,
    pub github_repo: String,
    #[serde(default = "default_branch")]
    pub branch: String,
}

impl CdnConfig {
    pub fn url_for(&self, artifact: &str) -> String {
        format!(
            "https://cdn.jsdelivr.net/gh/{}/{}@{}/{}",
            self.github_username, self.github_repo, self.branch, artifact
        )
    }
}

fn default_tab() -> String {
    "Sheet1".to_string()
}

fn default_output_dir() -> String {
    ".".to_string()
}

fn default_prefix() -> String {
    "stores".to_string()
}

fn default_branch() -> String {
    "main".to_string()
}

impl SheetConfig {
    pub fn new(document_id: &str, tab: &str, api_key: &str) -> Self {
        Self {
            document_id: document_id.to_string(),
            tab: tab.to_string(),
            api_key: api_key.to_string(),
            range: None,
            whole_sheet: false,
            base_url: None,
            timeout_seconds: None,
            duplicate_headers: DuplicateHeaderPolicy::default(),
            country_column: None,
        }
    }

    pub fn fetch_range(&self) -> Result<FetchRange> {
        if self.whole_sheet {
            return Ok(FetchRange::WholeSheet);
        }
        match self.range.as_deref() {
            Some(notation) => FetchRange::parse(notation),
            None => Ok(FetchRange::default()),
        }
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_SHEETS_BASE_URL)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds.unwrap_or(30))
    }

    pub fn country_column(&self) -> &str {
        self.country_column
            .as_deref()
            .unwrap_or(DEFAULT_COUNTRY_COLUMN)
    }
}

impl SyncConfig {
    pub fn new(sheet: SheetConfig) -> Self {
        Self {
            sheet,
            output: OutputConfig::default(),
            destinations: Vec::new(),
            cdn: None,
        }
    }

    pub fn is_multi_destination(&self) -> bool {
        !self.destinations.is_empty()
    }
}

impl Validate for SyncConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_required_string("sheet.document_id", &self.sheet.document_id)?;
        validation::validate_required_string("sheet.api_key", &self.sheet.api_key)?;
        validation::validate_non_empty_string("sheet.tab", &self.sheet.tab)?;
        validation::validate_url("sheet.base_url", self.sheet.base_url())?;
        validation::validate_range(
            "sheet.timeout_seconds",
            self.sheet.timeout().as_secs(),
            1,
            300,
        )?;
        self.sheet.fetch_range()?;

        validation::validate_path("output.dir", &self.output.dir)?;
        validation::validate_non_empty_string("output.prefix", &self.output.prefix)?;
        validation::validate_file_name("output.prefix", &self.output.prefix)?;

        for destination in &self.destinations {
            validation::validate_non_empty_string("destinations.name", &destination.name)?;
            validation::validate_file_name("destinations.name", &destination.name)?;
            if let Some(file) = &destination.output_file {
                validation::validate_file_name("destinations.output_file", file)?;
            }
        }
        validation::validate_unique(
            "destinations.name",
            self.destinations.iter().map(|d| d.name.as_str()),
        )?;
        validation::validate_unique(
            "artifacts",
            planned_artifact_names(self).iter().map(String::as_str),
        )?;

        if let Some(cdn) = &self.cdn {
            validation::validate_non_empty_string("cdn.github_username", &cdn.github_username)?;
            validation::validate_non_empty_string("cdn.github_repo", &cdn.github_repo)?;
        }

        Ok(())
    }
}
