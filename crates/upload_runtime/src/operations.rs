//! Async side-effect runners for reducer-emitted [`UploadEffect`]s.
//!
//! Each runner talks to the injected [`FileServices`] and reports results back as
//! [`UploadAction`]s through `dispatch`. They hold no state of their own.

use file_service::{FileServices, TransferProgress};
use leptos::logging;

use crate::{
    model::{FileRecord, ListTicket, UploadBatch},
    reducer::UploadAction,
};

/// Fetches the file list and reports it under `ticket`.
pub async fn fetch_file_list(
    services: &FileServices,
    ticket: ListTicket,
    dispatch: &dyn Fn(UploadAction),
) {
    match services.storage.list_files().await {
        Ok(entries) => dispatch(UploadAction::FileListLoaded { ticket, entries }),
        Err(error) => {
            logging::warn!("file list fetch failed: {error}");
            dispatch(UploadAction::FileListFailed { ticket, error });
        }
    }
}

/// Uploads every file of `batch` in order, one request at a time.
///
/// A failed file is reported and skipped; the batch always ends with
/// [`UploadAction::BatchFinished`].
pub async fn run_upload_batch(
    services: &FileServices,
    batch: UploadBatch,
    dispatch: &dyn Fn(UploadAction),
) {
    for (index, file) in batch.files().iter().enumerate() {
        let on_progress = |progress: TransferProgress| {
            dispatch(UploadAction::FileTransferProgress { index, progress });
        };
        match services.storage.upload_file(file, &on_progress).await {
            Ok(()) => dispatch(UploadAction::FileUploadSucceeded { index }),
            Err(error) => {
                logging::warn!("upload of `{}` failed: {error}", file.name);
                dispatch(UploadAction::FileUploadFailed {
                    index,
                    name: file.name.clone(),
                    error,
                });
            }
        }
    }
    dispatch(UploadAction::BatchFinished);
}

/// Downloads `record` and hands the bytes to the viewer.
pub async fn download_and_open(
    services: &FileServices,
    record: FileRecord,
    dispatch: &dyn Fn(UploadAction),
) {
    let bytes = match services.storage.download_file(&record.storage_key).await {
        Ok(bytes) => bytes,
        Err(error) => {
            logging::warn!("download of `{}` failed: {error}", record.name);
            dispatch(UploadAction::FileOpenFailed {
                name: record.name,
                error,
            });
            return;
        }
    };

    match services
        .viewer
        .open_file(&record.name, &record.mime_type, bytes)
    {
        Ok(()) => dispatch(UploadAction::FileOpened { name: record.name }),
        Err(error) => {
            logging::warn!("opening `{}` failed: {error}", record.name);
            dispatch(UploadAction::FileOpenFailed {
                name: record.name,
                error,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, collections::VecDeque, time::Duration};

    use file_service::{MemoryFileStorageService, MemoryFileViewer, UploadFile};
    use futures::executor::block_on;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{
        model::{StatusKind, StatusNotification, StatusToken, UploadState},
        reducer::{reduce_uploads, UploadEffect},
    };

    /// Drives the reducer and runs emitted effects against memory services, one at a time.
    struct Harness {
        services: FileServices,
        storage: MemoryFileStorageService,
        viewer: MemoryFileViewer,
        state: RefCell<UploadState>,
        queue: RefCell<VecDeque<UploadEffect>>,
        notifications: RefCell<Vec<StatusNotification>>,
        percents: RefCell<Vec<u8>>,
        timers: RefCell<Vec<(StatusToken, Duration)>>,
    }

    impl Harness {
        fn new() -> Self {
            let (services, storage, viewer) = FileServices::memory();
            Self {
                services,
                storage,
                viewer,
                state: RefCell::new(UploadState::default()),
                queue: RefCell::new(VecDeque::new()),
                notifications: RefCell::new(Vec::new()),
                percents: RefCell::new(Vec::new()),
                timers: RefCell::new(Vec::new()),
            }
        }

        fn dispatch(&self, action: UploadAction) {
            let is_progress = matches!(action, UploadAction::FileTransferProgress { .. });
            let mut state = self.state.borrow_mut();
            let previous_token = state.status_token;
            let effects = reduce_uploads(&mut state, action).expect("reduce");
            if state.status_token != previous_token {
                self.notifications.borrow_mut().push(state.status.clone());
            }
            if is_progress {
                self.percents.borrow_mut().push(state.progress.percent);
            }
            drop(state);
            self.queue.borrow_mut().extend(effects);
        }

        fn run(&self, action: UploadAction) {
            self.dispatch(action);
            loop {
                let next = self.queue.borrow_mut().pop_front();
                let Some(effect) = next else { break };
                let dispatch = |action: UploadAction| self.dispatch(action);
                match effect {
                    UploadEffect::FetchFileList { ticket } => {
                        block_on(fetch_file_list(&self.services, ticket, &dispatch))
                    }
                    UploadEffect::RunUploadBatch(batch) => {
                        block_on(run_upload_batch(&self.services, batch, &dispatch))
                    }
                    UploadEffect::DownloadAndOpen { record } => {
                        block_on(download_and_open(&self.services, record, &dispatch))
                    }
                    UploadEffect::ScheduleStatusClear { token, delay } => {
                        self.timers.borrow_mut().push((token, delay))
                    }
                }
            }
        }

        fn fire_latest_timer(&self) {
            let latest = self.timers.borrow().last().copied();
            if let Some((token, _)) = latest {
                self.run(UploadAction::ClearStatus { token });
            }
        }

        fn state(&self) -> UploadState {
            self.state.borrow().clone()
        }

        fn notification_texts(&self) -> Vec<String> {
            self.notifications
                .borrow()
                .iter()
                .map(|status| status.text.clone())
                .collect()
        }
    }

    const UPLOADED_AT: &str = "2024-06-01T08:30:00Z";

    fn batch(names: &[&str]) -> UploadBatch {
        UploadBatch::new(
            names
                .iter()
                .map(|name| UploadFile::from_bytes(*name, vec![7; 64]))
                .collect(),
        )
    }

    #[test]
    fn initial_load_lists_server_files() {
        let harness = Harness::new();
        harness.storage.insert("a.png", UPLOADED_AT, vec![1]);
        harness.storage.insert("b.pdf", UPLOADED_AT, vec![2]);

        harness.run(UploadAction::RequestFileList);

        let state = harness.state();
        assert_eq!(state.file_count(), 2);
        assert_eq!(state.files[1].mime_type, "application/pdf");
        assert!(harness.notification_texts().is_empty());
    }

    #[test]
    fn successful_batch_uploads_in_order_and_refreshes_once() {
        let harness = Harness::new();
        harness.run(UploadAction::RequestFileList);
        let lists_before = harness.storage.list_count();

        harness.run(UploadAction::UploadFiles(batch(&["a.png", "b.pdf"])));

        assert_eq!(harness.storage.upload_count(), 2);
        let uploaded: Vec<_> = harness
            .storage
            .entries()
            .into_iter()
            .map(|entry| entry.name)
            .collect();
        assert_eq!(uploaded, vec!["a.png", "b.pdf"]);
        assert_eq!(harness.storage.list_count(), lists_before + 1);

        let state = harness.state();
        assert_eq!(state.file_count(), 2);
        assert!(!state.progress.is_uploading);
        assert_eq!(state.progress.percent, 0);
        assert_eq!(
            harness.notifications.borrow().as_slice(),
            &[StatusNotification::shown(
                StatusKind::Success,
                "Successfully uploaded 2 files"
            )]
        );

        let percents = harness.percents.borrow().clone();
        assert!(percents.windows(2).all(|pair| pair[0] <= pair[1]), "{percents:?}");
        assert_eq!(percents.last(), Some(&100));
    }

    #[test]
    fn failing_file_reports_error_and_batch_continues() {
        let harness = Harness::new();
        harness.storage.fail_uploads_named("a.png");

        harness.run(UploadAction::UploadFiles(batch(&["a.png", "b.pdf"])));

        assert_eq!(
            harness.notification_texts(),
            vec![
                "Failed to upload a.png".to_string(),
                "Successfully uploaded 1 file".to_string(),
            ]
        );
        let state = harness.state();
        assert_eq!(state.file_count(), 1);
        assert_eq!(state.files[0].name, "b.pdf");
        assert!(!state.progress.is_uploading);
    }

    #[test]
    fn all_failed_batch_does_not_refetch() {
        let harness = Harness::new();
        harness.storage.fail_uploads_named("a.png");
        harness.run(UploadAction::RequestFileList);
        let lists_before = harness.storage.list_count();

        harness.run(UploadAction::UploadFiles(batch(&["a.png"])));

        assert_eq!(harness.storage.list_count(), lists_before);
        assert_eq!(harness.notification_texts(), vec!["Failed to upload a.png"]);
        assert_eq!(harness.state().status.kind, StatusKind::Error);
    }

    #[test]
    fn empty_batch_issues_no_requests() {
        let harness = Harness::new();
        harness.run(UploadAction::UploadFiles(UploadBatch::default()));
        assert!(harness.storage.calls().is_empty());
        assert!(harness.notifications.borrow().is_empty());
        assert!(!harness.state().progress.is_uploading);
    }

    #[test]
    fn list_failure_raises_error_and_keeps_previous_records() {
        let harness = Harness::new();
        harness.storage.insert("a.png", UPLOADED_AT, vec![1]);
        harness.run(UploadAction::RequestFileList);

        harness.storage.set_list_failure(true);
        harness.run(UploadAction::RequestFileList);

        assert_eq!(harness.state().file_count(), 1);
        assert_eq!(
            harness.notification_texts(),
            vec!["Failed to load files from server"]
        );
    }

    #[test]
    fn opening_a_file_downloads_then_views() {
        let harness = Harness::new();
        harness.storage.insert("a.png", UPLOADED_AT, vec![1, 2, 3]);
        harness.run(UploadAction::RequestFileList);

        harness.run(UploadAction::OpenFile {
            record_id: "mem-1".to_string(),
        });

        let opened = harness.viewer.opened();
        assert_eq!(opened.len(), 1);
        assert_eq!(opened[0].name, "a.png");
        assert_eq!(opened[0].mime_type, "image/png");
        assert_eq!(opened[0].byte_len, 3);
        assert_eq!(harness.notification_texts(), vec!["Opening a.png..."]);
    }

    #[test]
    fn download_failure_never_reaches_viewer() {
        let harness = Harness::new();
        harness.storage.insert("a.png", UPLOADED_AT, vec![1]);
        harness.run(UploadAction::RequestFileList);
        harness.storage.set_download_failure(true);

        harness.run(UploadAction::OpenFile {
            record_id: "mem-1".to_string(),
        });

        assert!(harness.viewer.opened().is_empty());
        assert_eq!(harness.notification_texts(), vec!["Failed to open a.png"]);
    }

    #[test]
    fn viewer_failure_raises_open_error() {
        let harness = Harness::new();
        harness.storage.insert("a.png", UPLOADED_AT, vec![1]);
        harness.run(UploadAction::RequestFileList);
        harness.viewer.set_failure(true);

        harness.run(UploadAction::OpenFile {
            record_id: "mem-1".to_string(),
        });

        assert_eq!(harness.notification_texts(), vec!["Failed to open a.png"]);
        assert_eq!(harness.state().status.kind, StatusKind::Error);
    }

    #[test]
    fn latest_timer_clears_and_earlier_timers_are_superseded() {
        let harness = Harness::new();
        harness.storage.insert("a.png", UPLOADED_AT, vec![1]);
        harness.run(UploadAction::RequestFileList);

        harness.run(UploadAction::OpenFile {
            record_id: "mem-1".to_string(),
        });
        let first = harness.timers.borrow()[0].0;
        harness.run(UploadAction::OpenFile {
            record_id: "mem-1".to_string(),
        });

        harness.run(UploadAction::ClearStatus { token: first });
        assert!(harness.state().status.visible);

        harness.fire_latest_timer();
        assert_eq!(harness.state().status, StatusNotification::default());
        assert!(harness
            .timers
            .borrow()
            .iter()
            .all(|(_, delay)| *delay == Duration::from_secs(3)));
    }
}
