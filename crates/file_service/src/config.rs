//! Compile-time configuration for reaching the remote file-storage API.

/// Base URL of the file-storage API used when nothing else is configured.
pub const DEFAULT_FILE_SERVICE_URL: &str = "http://localhost:5000/files";
/// Multipart form field carrying the uploaded file.
pub const UPLOAD_FORM_FIELD: &str = "file";

#[derive(Debug, Clone, PartialEq, Eq)]
/// Endpoint configuration for the remote file-storage API.
pub struct FileServiceConfig {
    /// Collection URL; list, upload, and download endpoints hang off it.
    pub base_url: String,
}

impl Default for FileServiceConfig {
    fn default() -> Self {
        Self::new(DEFAULT_FILE_SERVICE_URL)
    }
}

impl FileServiceConfig {
    /// Creates a config for `base_url`, dropping any trailing slashes.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// `GET` endpoint returning the file list.
    pub fn list_url(&self) -> String {
        self.base_url.clone()
    }

    /// `POST` endpoint accepting one multipart file.
    pub fn upload_url(&self) -> String {
        format!("{}/upload", self.base_url)
    }

    /// `GET` endpoint returning the raw bytes stored under `storage_key`.
    pub fn download_url(&self, storage_key: &str) -> String {
        format!("{}/download/{storage_key}", self.base_url)
    }
}
