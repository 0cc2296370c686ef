/// `load_config` module: loads a static YAML config and injects secrets from the environment.
///
/// The YAML file holds nothing sensitive:
///
/// ```yaml
/// workspace:
///   project: ems-analytics
///   root: /home/me/src        # optional, discovered from the current directory
/// storage:
///   bucket: ems-analytics-data
///   region: us-east-1
///   endpoint_url: null        # optional, for S3-compatible stores
/// ```
///
/// Credentials come from `AWS_ACCESS_KEY_ID` and `AWS_SECRET_ACCESS_KEY`
/// (a `.env` file is honoured by `main`). Every failure is a [`ConfigError`]
/// and happens before any storage client is built.
use bucket_ingest_core::{ConfigError, StorageConfig, Workspace};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, info};

pub const ACCESS_KEY_ENV: &str = "AWS_ACCESS_KEY_ID";
pub const SECRET_KEY_ENV: &str = "AWS_SECRET_ACCESS_KEY";

#[derive(Debug, Deserialize)]
struct RawConfig {
    workspace: WorkspaceSection,
    storage: StorageSection,
}

#[derive(Debug, Deserialize)]
struct WorkspaceSection {
    project: String,
    #[serde(default)]
    root: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
struct StorageSection {
    bucket: String,
    region: String,
    #[serde(default)]
    endpoint_url: Option<String>,
}

/// Fully merged configuration for one CLI invocation.
#[derive(Debug)]
pub struct CliConfig {
    pub workspace: Workspace,
    pub storage: StorageConfig,
}

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<CliConfig, ConfigError> {
    let path_ref = path.as_ref();
    info!(config_path = ?path_ref, "Loading configuration from file");

    let config_content = match fs::read_to_string(path_ref) {
        Ok(content) => {
            info!(config_path = ?path_ref, "Config file read successfully");
            content
        }
        Err(e) => {
            error!(error = ?e, config_path = ?path_ref, "Failed to read config file");
            return Err(ConfigError::Read {
                path: path_ref.to_path_buf(),
                source: e,
            });
        }
    };

    let raw: RawConfig = match serde_yaml::from_str(&config_content) {
        Ok(conf) => {
            info!(config_path = ?path_ref, "Parsed config YAML successfully");
            conf
        }
        Err(e) => {
            error!(error = ?e, config_path = ?path_ref, "Failed to parse config YAML");
            return Err(ConfigError::Parse {
                path: path_ref.to_path_buf(),
                message: e.to_string(),
            });
        }
    };

    if raw.workspace.project.trim().is_empty() {
        return Err(ConfigError::EmptyField {
            field: "workspace.project".to_string(),
        });
    }

    let access_key_id = require_env(ACCESS_KEY_ENV)?;
    let secret_access_key = require_env(SECRET_KEY_ENV)?;

    let storage = StorageConfig {
        access_key_id,
        secret_access_key,
        region: raw.storage.region,
        bucket_name: raw.storage.bucket,
        endpoint_url: raw.storage.endpoint_url,
    };
    storage.validate()?;

    let workspace = match raw.workspace.root {
        Some(root) => Workspace::new(root, raw.workspace.project),
        None => {
            let cwd = std::env::current_dir().map_err(|e| ConfigError::Read {
                path: PathBuf::from("."),
                source: e,
            })?;
            Workspace::discover(&cwd, &raw.workspace.project)?
        }
    };

    storage.trace_loaded();
    info!(
        root = %workspace.root.display(),
        project = %workspace.project,
        "Config loaded and merged successfully"
    );

    Ok(CliConfig { workspace, storage })
}

fn require_env(name: &str) -> Result<String, ConfigError> {
    match std::env::var(name) {
        Ok(value) => {
            info!(var = name, "Found in env");
            Ok(value)
        }
        Err(e) => {
            error!(error = ?e, var = name, "Environment variable not set");
            Err(ConfigError::MissingEnv {
                name: name.to_string(),
            })
        }
    }
}
