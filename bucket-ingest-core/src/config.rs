use std::fmt;
use tracing::{debug, info};

use crate::error::ConfigError;

/// Credentials and location of the bucket the engine synchronises with.
#[derive(Clone)]
pub struct StorageConfig {
    pub access_key_id: String,
    pub secret_access_key: String,
    pub region: String,
    pub bucket_name: String,
    /// Alternative endpoint for S3-compatible stores.
    pub endpoint_url: Option<String>,
}

impl StorageConfig {
    /// Rejects empty fields so a half-filled config fails at startup.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("access_key_id", &self.access_key_id),
            ("secret_access_key", &self.secret_access_key),
            ("region", &self.region),
            ("bucket_name", &self.bucket_name),
        ];
        for (field, value) in fields {
            if value.trim().is_empty() {
                return Err(ConfigError::EmptyField {
                    field: field.to_string(),
                });
            }
        }
        Ok(())
    }

    pub fn trace_loaded(&self) {
        info!(
            bucket = %self.bucket_name,
            region = %self.region,
            endpoint = self.endpoint_url.as_deref().unwrap_or("default"),
            "Loaded storage config"
        );
        debug!(?self, "Storage config loaded (full debug)");
    }
}

impl fmt::Debug for StorageConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StorageConfig")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"<redacted>")
            .field("region", &self.region)
            .field("bucket_name", &self.bucket_name)
            .field("endpoint_url", &self.endpoint_url)
            .finish()
    }
}
