//! Local-disk implementation of the file storage port

use std::path::PathBuf;

use async_trait::async_trait;
use care_core::{DomainError, FileStorage, UploadedFile};
use tokio::fs;
use tracing::{debug, instrument};
use uuid::Uuid;

use crate::config::StorageConfig;

/// Writes uploads under a directory and serves them from a public base URL
#[derive(Debug, Clone)]
pub struct LocalFileStorage {
    root: PathBuf,
    public_base_url: String,
    max_bytes: usize,
}

impl LocalFileStorage {
    pub fn new(root: impl Into<PathBuf>, public_base_url: impl Into<String>, max_bytes: usize) -> Self {
        Self {
            root: root.into(),
            public_base_url: public_base_url.into().trim_end_matches('/').to_string(),
            max_bytes,
        }
    }

    pub fn from_config(config: &StorageConfig) -> Self {
        Self::new(
            &config.upload_dir,
            &config.public_base_url,
            config.max_file_size_bytes(),
        )
    }

    /// Unique stored name, keeping the original extension
    fn stored_name(file: &UploadedFile) -> String {
        let id = Uuid::new_v4().simple();
        match file.extension() {
            Some(ext) if ext.chars().all(|c| c.is_ascii_alphanumeric()) => format!("{id}.{ext}"),
            _ => id.to_string(),
        }
    }

    /// File name under `root` for a URL this storage handed out
    fn stored_path(&self, url: &str) -> Option<PathBuf> {
        let name = url
            .strip_prefix(self.public_base_url.as_str())?
            .strip_prefix('/')?;
        let plain = !name.is_empty()
            && !name.starts_with('.')
            && !name.contains(['/', '\\']);
        plain.then(|| self.root.join(name))
    }
}

#[async_trait]
impl FileStorage for LocalFileStorage {
    #[instrument(skip(self, file), fields(file_name = %file.file_name, size = file.size()))]
    async fn upload(&self, file: UploadedFile) -> Result<String, DomainError> {
        if file.size() > self.max_bytes {
            return Err(DomainError::ValidationError(format!(
                "File exceeds the maximum size of {} bytes",
                self.max_bytes
            )));
        }

        fs::create_dir_all(&self.root)
            .await
            .map_err(|e| DomainError::StorageError(e.to_string()))?;

        let name = Self::stored_name(&file);
        fs::write(self.root.join(&name), &file.bytes)
            .await
            .map_err(|e| DomainError::StorageError(e.to_string()))?;

        debug!(stored_as = %name, "File stored");
        Ok(format!("{}/{}", self.public_base_url, name))
    }

    #[instrument(skip(self))]
    async fn delete(&self, url: &str) -> Result<(), DomainError> {
        let path = self
            .stored_path(url)
            .ok_or_else(|| DomainError::StorageError(format!("Not a stored upload: {url}")))?;

        match fs::remove_file(&path).await {
            Ok(()) => {
                debug!(path = %path.display(), "File removed");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(DomainError::StorageError(e.to_string())),
        }
    }
}
