//! HTTP adapter for the remote file-storage API.

use file_service::{
    FileServiceConfig, FileServiceFuture, FileStorageService, RemoteFileEntry, ServiceError,
    TransferProgress, UploadFile,
};

use crate::bridge;

#[derive(Debug, Clone, Default)]
/// Browser storage adapter speaking HTTP to the configured storage API.
pub struct WebFileStorageService {
    config: FileServiceConfig,
}

impl WebFileStorageService {
    /// Creates an adapter for the given endpoint configuration.
    pub fn new(config: FileServiceConfig) -> Self {
        Self { config }
    }

    /// Endpoint configuration in use.
    pub fn config(&self) -> &FileServiceConfig {
        &self.config
    }
}

impl FileStorageService for WebFileStorageService {
    fn list_files<'a>(&'a self) -> FileServiceFuture<'a, Result<Vec<RemoteFileEntry>, ServiceError>> {
        Box::pin(async move { bridge::list_files(&self.config.list_url()).await })
    }

    fn upload_file<'a>(
        &'a self,
        file: &'a UploadFile,
        on_progress: &'a dyn Fn(TransferProgress),
    ) -> FileServiceFuture<'a, Result<(), ServiceError>> {
        Box::pin(async move {
            bridge::upload_file(&self.config.upload_url(), file, on_progress).await
        })
    }

    fn download_file<'a>(
        &'a self,
        storage_key: &'a str,
    ) -> FileServiceFuture<'a, Result<Vec<u8>, ServiceError>> {
        Box::pin(async move {
            if storage_key.trim().is_empty() {
                return Err(ServiceError::MissingStorageKey);
            }
            bridge::download_file(&self.config.download_url(storage_key)).await
        })
    }
}
