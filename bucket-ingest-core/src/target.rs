use std::path::{Path, PathBuf};

use crate::category::Category;
use crate::error::ValidationError;
use crate::filename::DataFileName;
use crate::resolve;
use crate::workspace::Workspace;

/// One file-transfer intent: a validated `(category, file name)` pair with its
/// local path and remote key resolved once at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncTarget {
    category: Category,
    filename: DataFileName,
    local_path: PathBuf,
    remote_key: String,
}

impl SyncTarget {
    pub fn new(workspace: &Workspace, category: Category, filename: DataFileName) -> Self {
        let local_path = resolve::local_path(workspace, category, &filename);
        let remote_key = resolve::remote_key(category, &filename);
        Self {
            category,
            filename,
            local_path,
            remote_key,
        }
    }

    /// Validates the category first, then the file name.
    pub fn parse(workspace: &Workspace, category: &str, filename: &str) -> Result<Self, ValidationError> {
        let category: Category = category.parse()?;
        let filename = DataFileName::parse(filename)?;
        Ok(Self::new(workspace, category, filename))
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn filename(&self) -> &DataFileName {
        &self.filename
    }

    pub fn local_path(&self) -> &Path {
        &self.local_path
    }

    pub fn remote_key(&self) -> &str {
        &self.remote_key
    }
}
