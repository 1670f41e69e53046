//! Typed contracts and shared models for the remote file-storage service.
//!
//! This crate is the API-first boundary between the upload runtime and whatever actually moves
//! bytes. It exposes the wire types returned by the storage API, the [`FileStorageService`] and
//! [`FileViewer`] traits, and host-independent adapters (no-op and in-memory). Concrete browser
//! adapters live in `file_service_web`.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod config;
pub mod error;
pub mod host;
pub mod storage;
pub mod time;
pub mod types;
pub mod viewer;

pub use config::{FileServiceConfig, DEFAULT_FILE_SERVICE_URL, UPLOAD_FORM_FIELD};
pub use error::ServiceError;
pub use host::FileServices;
pub use storage::memory::{MemoryFileStorageService, MemoryServiceCall};
pub use storage::service::{FileServiceFuture, FileStorageService, NoopFileStorageService};
pub use time::{now_rfc3339, unix_time_ms_now};
pub use types::{RemoteFileEntry, TransferProgress, UploadBody, UploadFile};
pub use viewer::{FileViewer, MemoryFileViewer, NoopFileViewer, OpenedFile};
