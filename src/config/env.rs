use crate::config::{CdnConfig, SheetConfig, SyncConfig};
use crate::utils::error::{Result, SyncError};

impl SyncConfig {
    /// 從環境變數建立單一輸出配置 (沒有 destinations)
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &str| {
            lookup(name)
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| SyncError::MissingConfigError {
                    field: name.to_string(),
                })
        };

        let sheet = SheetConfig::new(
            &required("GOOGLE_SHEET_ID")?,
            &lookup("GOOGLE_SHEET_NAME").unwrap_or_else(|| "Sheet1".to_string()),
            &required("GOOGLE_API_KEY")?,
        );

        let mut config = SyncConfig::new(sheet);

        if let Some(dir) = lookup("OUTPUT_DIR") {
            config.output.dir = dir;
        }

        if let (Some(github_username), Some(github_repo)) =
            (lookup("GITHUB_USERNAME"), lookup("GITHUB_REPO"))
        {
            config.cdn = Some(CdnConfig {
                github_username,
                github_repo,
                branch: lookup("GITHUB_BRANCH").unwrap_or_else(|| "main".to_string()),
            });
        }

        Ok(config)
    }
}
