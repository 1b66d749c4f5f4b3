use crate::config::SyncConfig;
use crate::utils::error::{Result, SyncError};
use regex::Regex;
use std::path::Path;

impl SyncConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| SyncError::ConfigError {
            message: format!("cannot read {}: {}", path.display(), e),
        })?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = substitute_env_vars(content, |name| std::env::var(name).ok())?;

        toml::from_str(&processed_content).map_err(|e| SyncError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }
}

/// 替換環境變數 (例如 ${GOOGLE_API_KEY})；未設定的變數保持原樣
pub fn substitute_env_vars<F>(content: &str, lookup: F) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| SyncError::ConfigError {
        message: format!("Invalid substitution pattern: {}", e),
    })?;

    let result = re.replace_all(content, |caps: &regex::Captures| {
        let var_name = &caps[1];
        lookup(var_name).unwrap_or_else(|| format!("${{{}}}", var_name))
    });

    Ok(result.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DuplicateHeaderPolicy;
    use crate::domain::range::FetchRange;
    use crate::utils::validation::Validate;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_unreadable_config_file_is_config_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let missing = dir.path().join("sync.toml");

        let err = SyncConfig::from_file(&missing).unwrap_err();
        assert!(matches!(
            err,
            SyncError::ConfigError { ref message } if message.contains("sync.toml")
        ));
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_parse_multi_shop_config() {
        let toml_content = r#"
[sheet]
document_id = "1AbC"
tab = "Stores"
api_key = "secret"
range = "A1:M500"
duplicate_headers = "last_wins"

[output]
dir = "./public"

[[destinations]]
name = "int"
domain = "example.myshopify.com"
countries = []
currency = "EUR"
language = "en"
output_file = "stores-int.json"

[[destinations]]
name = "dk"
countries = ["dk"]
currency = "DKK"
language = "da"

[cdn]
github_username = "acme"
github_repo = "store-locator"
"#;

        let config = SyncConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.sheet.tab, "Stores");
        assert_eq!(
            config.sheet.fetch_range().unwrap(),
            FetchRange::parse("A1:M500").unwrap()
        );
        assert_eq!(config.sheet.duplicate_headers, DuplicateHeaderPolicy::LastWins);
        assert_eq!(config.output.dir, "./public");
        assert_eq!(config.output.prefix, "stores");
        assert_eq!(config.destinations.len(), 2);
        assert_eq!(config.destinations[1].countries, vec!["DK"]);
        assert_eq!(config.cdn.as_ref().unwrap().branch, "main");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_minimal_config_uses_defaults() {
        let toml_content = r#"
[sheet]
document_id = "1AbC"
api_key = "secret"
"#;

        let config = SyncConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.sheet.tab, "Sheet1");
        assert_eq!(config.output.dir, ".");
        assert!(config.destinations.is_empty());
        assert!(config.cdn.is_none());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("SHEET_SYNC_TEST_API_KEY", "from-env");

        let toml_content = r#"
[sheet]
document_id = "1AbC"
api_key = "${SHEET_SYNC_TEST_API_KEY}"
"#;

        let config = SyncConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.sheet.api_key, "from-env");

        std::env::remove_var("SHEET_SYNC_TEST_API_KEY");
    }

    #[test]
    fn test_unset_variable_is_left_in_place_and_fails_validation() {
        let substituted =
            substitute_env_vars("api_key = \"${NOPE}\"", |_| None).unwrap();
        assert_eq!(substituted, "api_key = \"${NOPE}\"");

        let config = SyncConfig::from_toml_str(
            r#"
[sheet]
document_id = "1AbC"
api_key = "${SHEET_SYNC_TEST_UNSET_KEY}"
"#,
        )
        .unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = SyncConfig::from_toml_str("[sheet\nbroken").unwrap_err();
        assert!(matches!(err, SyncError::ConfigError { .. }));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();

        let toml_content = r#"
[sheet]
document_id = "file-doc"
api_key = "secret"
"#;

        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = SyncConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.sheet.document_id, "file-doc");
    }
}
