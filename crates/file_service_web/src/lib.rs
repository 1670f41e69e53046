//! Browser (`wasm32`) implementations of [`file_service`] contracts.
//!
//! Transport glue lives under `bridge/`, split into a wasm implementation and a non-wasm shim
//! that reports [`file_service::ServiceError::Unavailable`], so the crate builds and tests on
//! the native target.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

/// Compile-time service-strategy selection and concrete adapter factories.
pub mod adapters;
mod bridge;
pub mod storage;
pub mod viewer;

pub use adapters::{
    build_file_services, file_storage_service, file_viewer, selected_service_strategy,
    service_strategy_name, FileStorageAdapter, FileViewerAdapter, ServiceStrategy,
};
pub use storage::WebFileStorageService;
pub use viewer::{ObjectUrlLease, WebFileViewer, OBJECT_URL_RELEASE_DELAY};
