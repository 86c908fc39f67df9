//! File storage port

use async_trait::async_trait;

use crate::error::DomainError;

/// A file received with a request, held in memory
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    /// Lower-cased extension of the original file name, if any
    pub fn extension(&self) -> Option<String> {
        std::path::Path::new(&self.file_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
    }
}

/// Stores uploaded files and returns the URL they are served from
#[async_trait]
pub trait FileStorage: Send + Sync {
    async fn upload(&self, file: UploadedFile) -> Result<String, DomainError>;

    /// Remove a previously uploaded file by the URL `upload` returned.
    /// Removing a file that is already gone succeeds.
    async fn delete(&self, url: &str) -> Result<(), DomainError>;
}
