use crate::core::Storage;
use crate::utils::error::Result;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }
}

impl Storage for LocalStorage {
    async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        let full_path = self.base_path.join(path);
        let data = tokio::fs::read(full_path).await?;
        Ok(data)
    }

    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let full_path = self.base_path.join(path);

        if let Some(parent) = full_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        tokio::fs::write(full_path, data).await?;
        Ok(())
    }
}

/// An uploaded workbook parked in the upload directory for the lifetime of
/// one request. The file is removed when this value is dropped.
#[derive(Debug)]
pub struct StagedUpload {
    file: NamedTempFile,
    original_name: Option<String>,
}

impl StagedUpload {
    pub fn stage(upload_dir: &Path, original_name: Option<String>, data: &[u8]) -> Result<Self> {
        fs::create_dir_all(upload_dir)?;

        let mut file = tempfile::Builder::new()
            .prefix("upload-")
            .tempfile_in(upload_dir)?;
        file.write_all(data)?;
        file.flush()?;

        tracing::debug!(
            "Staged upload {:?} ({} bytes) at {}",
            original_name,
            data.len(),
            file.path().display()
        );

        Ok(Self {
            file,
            original_name,
        })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// File name relative to the upload directory.
    pub fn file_name(&self) -> String {
        self.file
            .path()
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    pub fn original_name(&self) -> Option<&str> {
        self.original_name.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_local_storage_round_trip_creates_parents() {
        let dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(dir.path());

        storage.write_file("reports/teams.pdf", b"%PDF-1.3").await.unwrap();
        let data = storage.read_file("reports/teams.pdf").await.unwrap();

        assert_eq!(data, b"%PDF-1.3");
    }

    #[tokio::test]
    async fn test_staged_upload_is_readable_then_removed_on_drop() {
        let dir = TempDir::new().unwrap();
        let staged =
            StagedUpload::stage(dir.path(), Some("staff.xlsx".to_string()), b"bytes").unwrap();
        let path = staged.path().to_path_buf();

        let storage = LocalStorage::new(dir.path());
        assert_eq!(storage.read_file(&staged.file_name()).await.unwrap(), b"bytes");
        assert_eq!(staged.original_name(), Some("staff.xlsx"));

        drop(staged);
        assert!(!path.exists());
    }
}
