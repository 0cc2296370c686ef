use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::category::Category;
use crate::error::ConfigError;

/// Where a project lives locally: `<root>/<project>/data/<category folder>/...`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workspace {
    pub root: PathBuf,
    pub project: String,
}

impl Workspace {
    pub fn new(root: impl Into<PathBuf>, project: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            project: project.into(),
        }
    }

    /// Finds the directory the project was cloned into by walking up from `start`
    /// until the path no longer contains a `project` component.
    ///
    /// Starting at `/home/me/src/ems-analytics/notebooks` with project `ems-analytics`
    /// yields `/home/me/src`. A `start` outside the project is returned unchanged:
    /// `start` itself is a candidate, not only its parents, so running from
    /// `/srv/checkouts` roots the workspace there rather than at `/srv`.
    pub fn discover(start: &Path, project: &str) -> Result<Self, ConfigError> {
        for candidate in start.ancestors() {
            if candidate.as_os_str().is_empty() {
                continue;
            }
            let inside_project = candidate
                .components()
                .any(|c| c.as_os_str() == OsStr::new(project));
            if !inside_project {
                debug!(root = %candidate.display(), project, "Discovered workspace root");
                return Ok(Self::new(candidate, project));
            }
        }
        Err(ConfigError::WorkspaceNotFound {
            project: project.to_string(),
            start: start.to_path_buf(),
        })
    }

    pub fn project_dir(&self) -> PathBuf {
        self.root.join(&self.project)
    }

    pub fn data_dir(&self) -> PathBuf {
        self.project_dir().join("data")
    }

    pub fn category_dir(&self, category: Category) -> PathBuf {
        self.data_dir().join(category.folder())
    }
}
