use crate::utils::error::{Result, SyncError};
use std::collections::HashSet;
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(SyncError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(SyncError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(SyncError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(SyncError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(SyncError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

/// A single file name inside the output directory: no separators, no `..`.
pub fn validate_file_name(field_name: &str, name: &str) -> Result<()> {
    validate_path(field_name, name)?;

    let reason = if name.contains(['/', '\\']) {
        Some("File name cannot contain path separators")
    } else if name == "." || name == ".." {
        Some("File name cannot be a relative directory")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(SyncError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: name.to_string(),
            reason: reason.to_string(),
        }),
        None => Ok(()),
    }
}

/// Rejects empty values with `MissingConfigError`, so an unset `${VAR}` reads as missing.
pub fn validate_required_string(field_name: &str, value: &str) -> Result<()> {
    let trimmed = value.trim();
    if trimmed.is_empty() || (trimmed.starts_with("${") && trimmed.ends_with('}')) {
        return Err(SyncError::MissingConfigError {
            field: field_name.to_string(),
        });
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(SyncError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(SyncError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

pub fn validate_unique<'a, I>(field_name: &str, values: I) -> Result<()>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen = HashSet::new();
    for value in values {
        if !seen.insert(value) {
            return Err(SyncError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: value.to_string(),
                reason: "Value must be unique".to_string(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("sheet.base_url", "https://example.com").is_ok());
        assert!(validate_url("sheet.base_url", "http://example.com").is_ok());
        assert!(validate_url("sheet.base_url", "").is_err());
        assert!(validate_url("sheet.base_url", "invalid-url").is_err());
        assert!(validate_url("sheet.base_url", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_file_name_stays_in_output_dir() {
        assert!(validate_file_name("destinations.output_file", "stores-dk.json").is_ok());
        assert!(validate_file_name("destinations.output_file", "..stores.json").is_ok());
        assert!(validate_file_name("destinations.output_file", "../stores.json").is_err());
        assert!(validate_file_name("destinations.output_file", "sub/stores.json").is_err());
        assert!(validate_file_name("destinations.output_file", "sub\\stores.json").is_err());
        assert!(validate_file_name("destinations.output_file", "..").is_err());
        assert!(validate_file_name("destinations.output_file", "").is_err());
    }

    #[test]
    fn test_validate_required_string_treats_placeholder_as_missing() {
        assert!(validate_required_string("sheet.api_key", "abc").is_ok());
        assert!(matches!(
            validate_required_string("sheet.api_key", "${GOOGLE_API_KEY}"),
            Err(SyncError::MissingConfigError { .. })
        ));
        assert!(validate_required_string("sheet.api_key", "  ").is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("sheet.timeout_seconds", 30u64, 1, 300).is_ok());
        assert!(validate_range("sheet.timeout_seconds", 0u64, 1, 300).is_err());
        assert!(validate_range("sheet.timeout_seconds", 301u64, 1, 300).is_err());
    }

    #[test]
    fn test_validate_unique() {
        assert!(validate_unique("destinations.name", ["int", "dk"]).is_ok());
        assert!(validate_unique("destinations.name", ["dk", "dk"]).is_err());
    }
}
