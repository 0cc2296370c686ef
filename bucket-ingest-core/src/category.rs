//! The six data lifecycle stages a project file can belong to.
//!
//! Each stage has a numbered folder name (`01_raw`, `02_intermediate`, ...) that is
//! used both below `<project>/data/` locally and as the key prefix in the bucket.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Category {
    Raw,
    Intermediate,
    Processed,
    Models,
    ModelInput,
    Reporting,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Raw,
        Category::Intermediate,
        Category::Processed,
        Category::Models,
        Category::ModelInput,
        Category::Reporting,
    ];

    /// Folder name, e.g. `01_raw`. Doubles as the remote key prefix.
    pub fn folder(&self) -> &'static str {
        match self {
            Category::Raw => "01_raw",
            Category::Intermediate => "02_intermediate",
            Category::Processed => "03_processed",
            Category::Models => "04_models",
            Category::ModelInput => "05_model_input",
            Category::Reporting => "06_reporting",
        }
    }

    pub fn short_name(&self) -> &'static str {
        match self {
            Category::Raw => "raw",
            Category::Intermediate => "intermediate",
            Category::Processed => "processed",
            Category::Models => "models",
            Category::ModelInput => "model_input",
            Category::Reporting => "reporting",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.folder())
    }
}

/// Accepts either the folder name (`01_raw`) or the short name (`raw`).
impl FromStr for Category {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.folder() == s || c.short_name() == s)
            .ok_or_else(|| ValidationError::InvalidCategory {
                value: s.to_string(),
            })
    }
}

impl TryFrom<String> for Category {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Category> for String {
    fn from(c: Category) -> Self {
        c.folder().to_string()
    }
}
