//! File-based Form Loader Adapter
//!
//! Reads a form definition from disk. `.yaml`/`.yml` files are parsed as
//! YAML, everything else as JSON.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::schema::FormSchema;
use crate::ports::FormLoader;

/// Loads a form schema from a file.
#[derive(Debug, Clone)]
pub struct FileFormLoader {
    path: PathBuf,
}

impl FileFormLoader {
    /// Create a loader for the file at `path`.
    ///
    /// # Example
    /// ```ignore
    /// let loader = FileFormLoader::new("./forms/onboarding.json");
    /// controller.load(&loader).await?;
    /// ```
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn is_yaml(&self) -> bool {
        matches!(
            self.path.extension().and_then(|e| e.to_str()),
            Some("yaml") | Some("yml")
        )
    }

    fn load_error(&self, message: impl Into<String>) -> DomainError {
        DomainError::new(ErrorCode::SchemaLoadFailed, message)
            .with_detail("path", self.path.display().to_string())
    }
}

#[async_trait]
impl FormLoader for FileFormLoader {
    async fn load_form(&self) -> Result<FormSchema, DomainError> {
        let raw = fs::read_to_string(&self.path)
            .await
            .map_err(|e| self.load_error(format!("Failed to read form: {}", e)))?;

        let schema = if self.is_yaml() {
            serde_yaml::from_str(&raw)
                .map_err(|e| self.load_error(format!("Invalid YAML form: {}", e)))?
        } else {
            serde_json::from_str(&raw)
                .map_err(|e| self.load_error(format!("Invalid JSON form: {}", e)))?
        };

        tracing::debug!(path = %self.path.display(), "form loaded from file");
        Ok(schema)
    }
}
