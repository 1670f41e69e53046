//! Upload runtime state machine, side-effect executor, and Leptos UI for the file drop page.
//!
//! The runtime is a single [`UploadState`] mutated only by [`reduce_uploads`]. Reducer outputs are
//! [`UploadEffect`] intents drained by the effect executor, which calls the injected
//! [`file_service::FileServices`] and feeds results back as [`UploadAction`]s.

pub mod components;
mod effect_executor;
pub mod file_kind;
pub mod listing;
pub mod model;
pub mod operations;
pub mod progress;
pub mod reducer;
mod runtime_context;

pub use components::{batch_from_file_list, UploadPage};
pub use file_kind::FileCategory;
pub use model::{
    DragState, FileRecord, ListTicket, RuntimeConfig, StatusKind, StatusNotification, StatusToken,
    UploadBatch, UploadProgressState, UploadState, STATUS_CLEAR_DELAY,
};
pub use progress::{BatchTracker, ProgressPolicy};
pub use reducer::{reduce_uploads, ReducerError, UploadAction, UploadEffect};
pub use runtime_context::{use_upload_runtime, UploadProvider, UploadRuntimeContext};
