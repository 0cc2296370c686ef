//! Pure mapping from `(category, file name)` to a local path and a remote key.

use std::path::PathBuf;

use crate::category::Category;
use crate::filename::DataFileName;
use crate::workspace::Workspace;

/// `<root>/<project>/data/<category folder>/<file name>`
pub fn local_path(workspace: &Workspace, category: Category, filename: &DataFileName) -> PathBuf {
    workspace.category_dir(category).join(filename.as_str())
}

/// `<category folder>/<file name>`; always `/`-separated regardless of platform.
pub fn remote_key(category: Category, filename: &DataFileName) -> String {
    format!("{}/{}", category_prefix(category), filename)
}

pub fn category_prefix(category: Category) -> &'static str {
    category.folder()
}

/// Key of the zero-byte "folder" object some stores keep for a prefix.
pub fn directory_marker(prefix: &str) -> String {
    format!("{}/", prefix.trim_end_matches('/'))
}
