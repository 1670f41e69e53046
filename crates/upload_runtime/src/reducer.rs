//! Reducer actions, side-effect intents, and transition logic for the upload runtime.

use std::time::Duration;

use file_service::{RemoteFileEntry, ServiceError, TransferProgress};
use thiserror::Error;

use crate::{
    listing::records_from_entries,
    model::{
        DragState, FileRecord, ListTicket, StatusKind, StatusNotification, StatusToken,
        UploadBatch, UploadProgressState, UploadState,
    },
    progress::BatchTracker,
};

pub const LIST_FAILED_TEXT: &str = "Failed to load files from server";

#[derive(Debug, Clone, PartialEq)]
/// Actions accepted by [`reduce_uploads`] to mutate [`UploadState`].
pub enum UploadAction {
    /// Issue a new list request; only its response may replace the list.
    RequestFileList,
    /// The list request identified by `ticket` succeeded.
    FileListLoaded {
        /// Ticket of the request that produced `entries`.
        ticket: ListTicket,
        /// Raw list response in server order.
        entries: Vec<RemoteFileEntry>,
    },
    /// The list request identified by `ticket` failed.
    FileListFailed {
        /// Ticket of the failed request.
        ticket: ListTicket,
        /// Transport or server failure.
        error: ServiceError,
    },
    /// Pointer dragging files entered the drop zone.
    DragEnter,
    /// Pointer dragging files left the drop zone.
    DragLeave,
    /// Files were dropped on the drop zone.
    Drop(UploadBatch),
    /// Files were chosen (picker) or forwarded by [`UploadAction::Drop`].
    UploadFiles(UploadBatch),
    /// Transfer sample for the file at `index` of the running batch.
    FileTransferProgress {
        /// Position of the file in its batch.
        index: usize,
        /// Bytes sent so far.
        progress: TransferProgress,
    },
    /// The file at `index` of the running batch was stored.
    FileUploadSucceeded {
        /// Position of the file in its batch.
        index: usize,
    },
    /// The file at `index` of the running batch was rejected; the batch continues.
    FileUploadFailed {
        /// Position of the file in its batch.
        index: usize,
        /// Filename shown in the error notification.
        name: String,
        /// Transport or server failure.
        error: ServiceError,
    },
    /// Every file of the running batch has been attempted.
    BatchFinished,
    /// The user asked to view a listed file.
    OpenFile {
        /// Id of the listed record.
        record_id: String,
    },
    /// A downloaded file was handed to the viewer.
    FileOpened {
        /// Filename shown in the notification.
        name: String,
    },
    /// Downloading or presenting a file failed.
    FileOpenFailed {
        /// Filename shown in the notification.
        name: String,
        /// Transport, server, or viewer failure.
        error: ServiceError,
    },
    /// The auto-clear timer for the notification identified by `token` fired.
    ClearStatus {
        /// Token captured when the timer was scheduled.
        token: StatusToken,
    },
}

#[derive(Debug, Clone, PartialEq)]
/// Side-effect intents emitted by [`reduce_uploads`] for the runtime to execute.
pub enum UploadEffect {
    /// Fetch the file list and report back with the same ticket.
    FetchFileList {
        /// Ticket to echo in the result action.
        ticket: ListTicket,
    },
    /// Upload the batch one file at a time, in order, then report [`UploadAction::BatchFinished`].
    RunUploadBatch(UploadBatch),
    /// Download `record` and open it in a new view.
    DownloadAndOpen {
        /// Record to open.
        record: FileRecord,
    },
    /// Replace any pending notification timer with one that clears `token` after `delay`.
    ScheduleStatusClear {
        /// Notification the timer belongs to.
        token: StatusToken,
        /// Time until the notification hides.
        delay: Duration,
    },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Reducer errors for actions that do not match the current state.
pub enum ReducerError {
    /// No listed record has the requested id.
    #[error("file record `{0}` not found")]
    RecordNotFound(String),
    /// A per-file upload event arrived while no batch is running.
    #[error("no upload batch is running")]
    NoActiveBatch,
}

/// Applies an [`UploadAction`] to the upload state and collects resulting side effects.
///
/// # Errors
///
/// Returns [`ReducerError`] when an action references a record or batch that does not exist.
/// The state is left untouched in that case.
pub fn reduce_uploads(
    state: &mut UploadState,
    action: UploadAction,
) -> Result<Vec<UploadEffect>, ReducerError> {
    let mut effects = Vec::new();
    match action {
        UploadAction::RequestFileList => effects.push(request_file_list(state)),
        UploadAction::FileListLoaded { ticket, entries } => {
            if ticket == state.latest_list_ticket {
                state.files = records_from_entries(entries);
            }
        }
        UploadAction::FileListFailed { ticket, .. } => {
            if ticket == state.latest_list_ticket {
                effects.push(raise_status(state, StatusKind::Error, LIST_FAILED_TEXT));
            }
        }
        UploadAction::DragEnter => state.drag = DragState::DragActive,
        UploadAction::DragLeave => state.drag = DragState::Idle,
        UploadAction::Drop(batch) => {
            state.drag = DragState::Idle;
            effects.extend(enqueue_batch(state, batch));
        }
        UploadAction::UploadFiles(batch) => effects.extend(enqueue_batch(state, batch)),
        UploadAction::FileTransferProgress { index, progress } => {
            let policy = state.config.progress_policy;
            let tracker = state.batch.as_mut().ok_or(ReducerError::NoActiveBatch)?;
            state.progress.percent = tracker.record_transfer(index, progress, policy);
        }
        UploadAction::FileUploadSucceeded { index } => {
            let policy = state.config.progress_policy;
            let tracker = state.batch.as_mut().ok_or(ReducerError::NoActiveBatch)?;
            state.progress.percent = tracker.record_settled(index, true, policy);
        }
        UploadAction::FileUploadFailed { index, name, .. } => {
            let policy = state.config.progress_policy;
            let tracker = state.batch.as_mut().ok_or(ReducerError::NoActiveBatch)?;
            state.progress.percent = tracker.record_settled(index, false, policy);
            effects.push(raise_status(
                state,
                StatusKind::Error,
                format!("Failed to upload {name}"),
            ));
        }
        UploadAction::BatchFinished => {
            let tracker = state.batch.take().ok_or(ReducerError::NoActiveBatch)?;
            state.progress = UploadProgressState::default();

            let completed = tracker.files_completed();
            if completed > 0 {
                effects.push(raise_status(
                    state,
                    StatusKind::Success,
                    success_text(completed),
                ));
                effects.push(request_file_list(state));
            } else if state.status.visible {
                // Restart the active notification's timer from batch completion.
                effects.push(UploadEffect::ScheduleStatusClear {
                    token: state.status_token,
                    delay: state.config.status_clear_delay,
                });
            }

            if let Some(next) = state.queued_batches.pop_front() {
                effects.push(start_batch(state, next));
            }
        }
        UploadAction::OpenFile { record_id } => {
            let record = state
                .record(&record_id)
                .cloned()
                .ok_or(ReducerError::RecordNotFound(record_id))?;
            if record.storage_key.trim().is_empty() {
                effects.push(raise_status(
                    state,
                    StatusKind::Error,
                    format!("Failed to open {}", record.name),
                ));
            } else {
                effects.push(UploadEffect::DownloadAndOpen { record });
            }
        }
        UploadAction::FileOpened { name } => {
            effects.push(raise_status(
                state,
                StatusKind::Success,
                format!("Opening {name}..."),
            ));
        }
        UploadAction::FileOpenFailed { name, .. } => {
            effects.push(raise_status(
                state,
                StatusKind::Error,
                format!("Failed to open {name}"),
            ));
        }
        UploadAction::ClearStatus { token } => {
            if token == state.status_token {
                state.status = StatusNotification::default();
            }
        }
    }
    Ok(effects)
}

/// Success text for a finished batch: `"Successfully uploaded 1 file"`, `"... 2 files"`.
pub fn success_text(completed: usize) -> String {
    let plural = if completed == 1 { "" } else { "s" };
    format!("Successfully uploaded {completed} file{plural}")
}

fn request_file_list(state: &mut UploadState) -> UploadEffect {
    state.latest_list_ticket = ListTicket(state.latest_list_ticket.0.saturating_add(1));
    UploadEffect::FetchFileList {
        ticket: state.latest_list_ticket,
    }
}

fn raise_status(state: &mut UploadState, kind: StatusKind, text: impl Into<String>) -> UploadEffect {
    state.status_token = StatusToken(state.status_token.0.saturating_add(1));
    state.status = StatusNotification::shown(kind, text);
    UploadEffect::ScheduleStatusClear {
        token: state.status_token,
        delay: state.config.status_clear_delay,
    }
}

// Batches never overlap: one arriving mid-upload waits for `BatchFinished`.
fn enqueue_batch(state: &mut UploadState, batch: UploadBatch) -> Option<UploadEffect> {
    if batch.is_empty() {
        return None;
    }
    if state.batch.is_some() {
        state.queued_batches.push_back(batch);
        return None;
    }
    Some(start_batch(state, batch))
}

fn start_batch(state: &mut UploadState, batch: UploadBatch) -> UploadEffect {
    state.batch = Some(BatchTracker::new(batch.sizes()));
    state.progress = UploadProgressState {
        is_uploading: true,
        percent: 0,
    };
    UploadEffect::RunUploadBatch(batch)
}
