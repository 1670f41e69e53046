//! File-storage service contract.

use std::{future::Future, pin::Pin};

use crate::{RemoteFileEntry, ServiceError, TransferProgress, UploadFile};

/// Object-safe boxed future used by [`FileStorageService`] async methods.
pub type FileServiceFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Host service for the remote list/upload/download API.
pub trait FileStorageService {
    /// Fetches the current file list in server order.
    fn list_files<'a>(&'a self) -> FileServiceFuture<'a, Result<Vec<RemoteFileEntry>, ServiceError>>;

    /// Uploads one file, reporting transfer progress through `on_progress` while bytes are sent.
    fn upload_file<'a>(
        &'a self,
        file: &'a UploadFile,
        on_progress: &'a dyn Fn(TransferProgress),
    ) -> FileServiceFuture<'a, Result<(), ServiceError>>;

    /// Downloads the raw bytes stored under `storage_key`.
    fn download_file<'a>(
        &'a self,
        storage_key: &'a str,
    ) -> FileServiceFuture<'a, Result<Vec<u8>, ServiceError>>;
}

#[derive(Debug, Clone, Copy, Default)]
/// No-op storage adapter for builds without a reachable storage API.
///
/// Listing succeeds with no files; uploads and downloads fail.
pub struct NoopFileStorageService;

impl FileStorageService for NoopFileStorageService {
    fn list_files<'a>(&'a self) -> FileServiceFuture<'a, Result<Vec<RemoteFileEntry>, ServiceError>> {
        Box::pin(async { Ok(Vec::new()) })
    }

    fn upload_file<'a>(
        &'a self,
        _file: &'a UploadFile,
        _on_progress: &'a dyn Fn(TransferProgress),
    ) -> FileServiceFuture<'a, Result<(), ServiceError>> {
        Box::pin(async { Err(ServiceError::Unavailable("file upload")) })
    }

    fn download_file<'a>(
        &'a self,
        _storage_key: &'a str,
    ) -> FileServiceFuture<'a, Result<Vec<u8>, ServiceError>> {
        Box::pin(async { Err(ServiceError::Unavailable("file download")) })
    }
}
