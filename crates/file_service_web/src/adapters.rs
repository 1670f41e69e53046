use std::rc::Rc;

use file_service::{
    FileServiceConfig, FileServiceFuture, FileServices, FileStorageService, FileViewer,
    NoopFileStorageService, NoopFileViewer, RemoteFileEntry, ServiceError, TransferProgress,
    UploadFile,
};

use crate::{WebFileStorageService, WebFileViewer};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Compile-time selected strategy for `file_service_web` adapters.
pub enum ServiceStrategy {
    /// HTTP storage API plus object-URL viewer.
    Http,
    /// No-op adapters for builds without a storage API (UI work, smoke tests).
    Stub,
}

/// Returns the compile-time selected service strategy for the active build.
pub const fn selected_service_strategy() -> ServiceStrategy {
    #[cfg(feature = "file-service-stub")]
    {
        ServiceStrategy::Stub
    }

    #[cfg(not(feature = "file-service-stub"))]
    {
        ServiceStrategy::Http
    }
}

/// Returns the selected service strategy as a stable string token.
pub fn service_strategy_name() -> &'static str {
    match selected_service_strategy() {
        ServiceStrategy::Http => "http",
        ServiceStrategy::Stub => "stub",
    }
}

/// Adapter enum that erases the concrete storage backend behind [`FileStorageService`].
#[derive(Debug, Clone)]
pub enum FileStorageAdapter {
    /// HTTP storage API.
    Http(WebFileStorageService),
    /// No-op storage.
    Stub(NoopFileStorageService),
}

impl FileStorageService for FileStorageAdapter {
    fn list_files<'a>(&'a self) -> FileServiceFuture<'a, Result<Vec<RemoteFileEntry>, ServiceError>> {
        match self {
            Self::Http(service) => service.list_files(),
            Self::Stub(service) => service.list_files(),
        }
    }

    fn upload_file<'a>(
        &'a self,
        file: &'a UploadFile,
        on_progress: &'a dyn Fn(TransferProgress),
    ) -> FileServiceFuture<'a, Result<(), ServiceError>> {
        match self {
            Self::Http(service) => service.upload_file(file, on_progress),
            Self::Stub(service) => service.upload_file(file, on_progress),
        }
    }

    fn download_file<'a>(
        &'a self,
        storage_key: &'a str,
    ) -> FileServiceFuture<'a, Result<Vec<u8>, ServiceError>> {
        match self {
            Self::Http(service) => service.download_file(storage_key),
            Self::Stub(service) => service.download_file(storage_key),
        }
    }
}

/// Adapter enum that erases the concrete viewer behind [`FileViewer`].
#[derive(Debug, Clone, Copy)]
pub enum FileViewerAdapter {
    /// Object-URL viewer.
    Http(WebFileViewer),
    /// No-op viewer.
    Stub(NoopFileViewer),
}

impl FileViewer for FileViewerAdapter {
    fn open_file(&self, name: &str, mime_type: &str, bytes: Vec<u8>) -> Result<(), ServiceError> {
        match self {
            Self::Http(viewer) => viewer.open_file(name, mime_type, bytes),
            Self::Stub(viewer) => viewer.open_file(name, mime_type, bytes),
        }
    }
}

/// Builds the storage adapter for the compile-time selected strategy.
pub fn file_storage_service(config: FileServiceConfig) -> FileStorageAdapter {
    match selected_service_strategy() {
        ServiceStrategy::Http => FileStorageAdapter::Http(WebFileStorageService::new(config)),
        ServiceStrategy::Stub => FileStorageAdapter::Stub(NoopFileStorageService),
    }
}

/// Builds the viewer adapter for the compile-time selected strategy.
pub fn file_viewer() -> FileViewerAdapter {
    match selected_service_strategy() {
        ServiceStrategy::Http => FileViewerAdapter::Http(WebFileViewer),
        ServiceStrategy::Stub => FileViewerAdapter::Stub(NoopFileViewer),
    }
}

/// Assembles the service bundle injected into the upload runtime.
pub fn build_file_services(config: FileServiceConfig) -> FileServices {
    FileServices::new(
        Rc::new(file_storage_service(config)),
        Rc::new(file_viewer()),
    )
}
