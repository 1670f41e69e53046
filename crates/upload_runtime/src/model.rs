use std::{collections::VecDeque, time::Duration};

use file_service::UploadFile;
use serde::{Deserialize, Serialize};

use crate::file_kind::FileCategory;
use crate::progress::{BatchTracker, ProgressPolicy};

pub const STATUS_CLEAR_DELAY: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct ListTicket(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct StatusToken(pub u64);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    pub id: String,
    pub name: String,
    pub mime_type: String,
    pub category: FileCategory,
    pub upload_date: String,
    pub storage_key: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadBatch {
    files: Vec<UploadFile>,
}

impl UploadBatch {
    pub fn new(files: Vec<UploadFile>) -> Self {
        Self { files }
    }

    pub fn files(&self) -> &[UploadFile] {
        &self.files
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn sizes(&self) -> Vec<u64> {
        self.files.iter().map(|file| file.size_bytes).collect()
    }
}

impl From<Vec<UploadFile>> for UploadBatch {
    fn from(files: Vec<UploadFile>) -> Self {
        Self::new(files)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UploadProgressState {
    pub is_uploading: bool,
    pub percent: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StatusKind {
    #[default]
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StatusNotification {
    pub visible: bool,
    pub kind: StatusKind,
    pub text: String,
}

impl StatusNotification {
    pub fn shown(kind: StatusKind, text: impl Into<String>) -> Self {
        Self {
            visible: true,
            kind,
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DragState {
    #[default]
    Idle,
    DragActive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuntimeConfig {
    pub status_clear_delay: Duration,
    pub progress_policy: ProgressPolicy,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            status_clear_delay: STATUS_CLEAR_DELAY,
            progress_policy: ProgressPolicy::default(),
        }
    }
}

/// The controller's entire client-side state. Only [`crate::reducer::reduce_uploads`] mutates it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct UploadState {
    pub files: Vec<FileRecord>,
    pub drag: DragState,
    pub progress: UploadProgressState,
    pub status: StatusNotification,
    pub status_token: StatusToken,
    pub latest_list_ticket: ListTicket,
    pub batch: Option<BatchTracker>,
    pub queued_batches: VecDeque<UploadBatch>,
    pub config: RuntimeConfig,
}

impl UploadState {
    pub fn with_config(config: RuntimeConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    pub fn is_drag_active(&self) -> bool {
        self.drag == DragState::DragActive
    }

    pub fn record(&self, record_id: &str) -> Option<&FileRecord> {
        self.files.iter().find(|record| record.id == record_id)
    }
}
