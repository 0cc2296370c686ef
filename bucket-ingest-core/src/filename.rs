use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

use crate::error::ValidationError;

/// Extensions a data file may carry, compared case-insensitively.
pub const ALLOWED_EXTENSIONS: &[&str] = &["csv", "xlsx", "xls", "html", "parquet", "json", "pkl"];

// YYYYMMDD-initials-short-description.ext
static NAMING_CONVENTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d{8}-[A-Za-z]{2,4}-[A-Za-z0-9]+(?:[-_][A-Za-z0-9]+)*\.[A-Za-z0-9]+$")
        .expect("naming convention regex is valid")
});

/// A plain file name with an allowed extension, e.g. `20210213-abc-raw-test.csv`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DataFileName(String);

impl DataFileName {
    pub fn parse(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();

        if value.trim().is_empty() {
            return Err(ValidationError::InvalidType {
                value,
                reason: "file name must not be empty".to_string(),
            });
        }
        if value.trim() != value || value.chars().any(char::is_control) {
            return Err(ValidationError::InvalidType {
                value,
                reason: "file name must not have surrounding whitespace or control characters"
                    .to_string(),
            });
        }
        if value.contains(['/', '\\']) || value == "." || value == ".." {
            return Err(ValidationError::InvalidType {
                value,
                reason: "expected a plain file name, not a path".to_string(),
            });
        }

        let allowed = match value.rsplit_once('.') {
            Some((stem, ext)) if !stem.is_empty() => ALLOWED_EXTENSIONS
                .iter()
                .any(|a| a.eq_ignore_ascii_case(ext)),
            _ => false,
        };
        if !allowed {
            return Err(ValidationError::InvalidExtension {
                value,
                allowed: ALLOWED_EXTENSIONS.join(", "),
            });
        }

        Ok(DataFileName(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn extension(&self) -> &str {
        self.0.rsplit_once('.').map(|(_, ext)| ext).unwrap_or_default()
    }

    /// Whether the name follows `YYYYMMDD-initials-short-description.ext`.
    /// Advisory only; nothing rejects a name for failing this.
    pub fn follows_naming_convention(&self) -> bool {
        NAMING_CONVENTION.is_match(&self.0)
    }
}

impl fmt::Display for DataFileName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for DataFileName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
