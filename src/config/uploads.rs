use std::env;
use std::path::PathBuf;

#[derive(Clone, Debug)]
pub struct UploadConfig {
    /// Directory uploaded files are written to and served from.
    pub dir: PathBuf,
    pub max_file_size: usize,
    pub allowed_extensions: Vec<String>,
}

impl UploadConfig {
    pub fn from_env() -> Self {
        Self {
            dir: env::var("UPLOAD_DIR")
                .unwrap_or_else(|_| "uploads".to_string())
                .into(),
            max_file_size: env::var("MAX_UPLOAD_BYTES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(5 * 1024 * 1024), // 5MB
            allowed_extensions: env::var("ALLOWED_AVATAR_EXTENSIONS")
                .unwrap_or_else(|_| "jpg,jpeg,png,webp".to_string())
                .split(',')
                .map(|s| s.trim().to_ascii_lowercase())
                .filter(|s| !s.is_empty())
                .collect(),
        }
    }
}
