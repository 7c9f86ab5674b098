//! Avatar file storage on the local filesystem.
//!
//! Uploaded files are stored under the configured upload directory with a
//! server-generated UUID filename, so concurrent uploads can never collide
//! on a client-supplied name. The stored key (e.g. `avatars/<uuid>.png`) is
//! what gets persisted on the student record and served under `/uploads`.

use std::fmt;
use std::path::{Path, PathBuf};
use tokio::fs;
use uuid::Uuid;

use crate::config::uploads::UploadConfig;

#[derive(Debug)]
pub enum StorageError {
    /// File exceeds the configured size cap.
    InvalidFileSize { max_bytes: usize },

    /// Extension not on the allow-list.
    InvalidExtension {
        received: String,
        allowed: Vec<String>,
    },

    /// Upload filename had no extension at all.
    MissingExtension,

    /// Filesystem failure.
    Io(std::io::Error),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidFileSize { max_bytes } => {
                write!(f, "File exceeds maximum size of {} bytes", max_bytes)
            }
            Self::InvalidExtension { received, allowed } => {
                write!(
                    f,
                    "File extension '{}' is not allowed. Allowed extensions: {}",
                    received,
                    allowed.join(", ")
                )
            }
            Self::MissingExtension => write!(f, "File name has no extension"),
            Self::Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for StorageError {}

impl From<std::io::Error> for StorageError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl StorageError {
    /// Rejections the caller caused (bad extension, oversized file) map to
    /// 400; everything else is a server fault.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidFileSize { .. } | Self::InvalidExtension { .. } | Self::MissingExtension
        )
    }
}

#[derive(Clone, Debug)]
pub struct UploadStore {
    base_dir: PathBuf,
    max_file_size: usize,
    allowed_extensions: Vec<String>,
}

impl UploadStore {
    pub fn new(config: &UploadConfig) -> Self {
        Self {
            base_dir: config.dir.clone(),
            max_file_size: config.max_file_size,
            allowed_extensions: config.allowed_extensions.clone(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn extension_of(&self, file_name: &str) -> Result<String, StorageError> {
        let ext = Path::new(file_name)
            .extension()
            .and_then(|e| e.to_str())
            .ok_or(StorageError::MissingExtension)?
            .to_ascii_lowercase();

        if !self.allowed_extensions.iter().any(|a| a == &ext) {
            return Err(StorageError::InvalidExtension {
                received: ext,
                allowed: self.allowed_extensions.clone(),
            });
        }

        Ok(ext)
    }

    /// Validates and stores avatar bytes, returning the relative storage key.
    pub async fn save_avatar(
        &self,
        original_name: &str,
        content: &[u8],
    ) -> Result<String, StorageError> {
        let ext = self.extension_of(original_name)?;

        if content.len() > self.max_file_size {
            return Err(StorageError::InvalidFileSize {
                max_bytes: self.max_file_size,
            });
        }

        let key = format!("avatars/{}.{}", Uuid::new_v4(), ext);
        let file_path = self.base_dir.join(&key);

        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).await?;
        }
        fs::write(&file_path, content).await?;

        Ok(key)
    }

    /// Removes a stored file. Missing files are not an error; keys that
    /// escape the upload directory are ignored.
    pub async fn delete(&self, key: &str) -> Result<(), StorageError> {
        if key.is_empty() || key.contains("..") || key.starts_with('/') {
            return Ok(());
        }

        match fs::remove_file(self.base_dir.join(key)).await {
            Ok(_) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_store(dir: PathBuf) -> UploadStore {
        UploadStore {
            base_dir: dir,
            max_file_size: 1024,
            allowed_extensions: vec![
                "jpg".to_string(),
                "jpeg".to_string(),
                "png".to_string(),
                "webp".to_string(),
            ],
        }
    }

    fn temp_dir() -> PathBuf {
        std::env::temp_dir().join(format!("rollbook-test-{}", Uuid::new_v4()))
    }

    #[test]
    fn accepts_allowed_extensions() {
        let store = test_store(temp_dir());
        assert_eq!(store.extension_of("me.png").unwrap(), "png");
        assert_eq!(store.extension_of("photo.JPG").unwrap(), "jpg");
        assert_eq!(store.extension_of("a.b.jpeg").unwrap(), "jpeg");
    }

    #[test]
    fn rejects_disallowed_extensions() {
        let store = test_store(temp_dir());
        assert!(matches!(
            store.extension_of("script.exe"),
            Err(StorageError::InvalidExtension { .. })
        ));
        assert!(matches!(
            store.extension_of("page.html"),
            Err(StorageError::InvalidExtension { .. })
        ));
    }

    #[test]
    fn rejects_missing_extension() {
        let store = test_store(temp_dir());
        assert!(matches!(
            store.extension_of("avatar"),
            Err(StorageError::MissingExtension)
        ));
    }

    #[tokio::test]
    async fn rejects_oversized_files() {
        let store = test_store(temp_dir());
        let content = vec![0u8; 2048];
        assert!(matches!(
            store.save_avatar("big.png", &content).await,
            Err(StorageError::InvalidFileSize { .. })
        ));
    }

    #[tokio::test]
    async fn save_generates_unique_keys() {
        let dir = temp_dir();
        let store = test_store(dir.clone());

        let key1 = store.save_avatar("same.png", b"one").await.unwrap();
        let key2 = store.save_avatar("same.png", b"two").await.unwrap();

        assert_ne!(key1, key2);
        assert!(key1.starts_with("avatars/"));
        assert!(key1.ends_with(".png"));
        assert_eq!(fs::read(dir.join(&key1)).await.unwrap(), b"one");
        assert_eq!(fs::read(dir.join(&key2)).await.unwrap(), b"two");

        let _ = fs::remove_dir_all(&dir).await;
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let dir = temp_dir();
        let store = test_store(dir.clone());

        let key = store.save_avatar("gone.png", b"bytes").await.unwrap();
        store.delete(&key).await.unwrap();
        store.delete(&key).await.unwrap();
        assert!(fs::metadata(dir.join(&key)).await.is_err());

        let _ = fs::remove_dir_all(&dir).await;
    }

    #[tokio::test]
    async fn delete_ignores_traversal_keys() {
        let store = test_store(temp_dir());
        store.delete("../outside.png").await.unwrap();
        store.delete("/etc/passwd").await.unwrap();
    }

    #[test]
    fn client_error_classification() {
        assert!(StorageError::MissingExtension.is_client_error());
        assert!(StorageError::InvalidFileSize { max_bytes: 1 }.is_client_error());
        assert!(!StorageError::Io(std::io::Error::other("boom")).is_client_error());
    }
}
