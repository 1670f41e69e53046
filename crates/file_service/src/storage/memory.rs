//! In-memory storage adapter with scripted failures, used by tests and offline demos.

use std::{
    cell::RefCell,
    collections::{BTreeMap, HashSet},
    rc::Rc,
};

use super::service::{FileServiceFuture, FileStorageService};
use crate::{now_rfc3339, RemoteFileEntry, ServiceError, TransferProgress, UploadBody, UploadFile};

#[derive(Debug, Clone, PartialEq, Eq)]
/// One call observed by [`MemoryFileStorageService`].
pub enum MemoryServiceCall {
    /// `list_files` was called.
    List,
    /// `upload_file` was called for the named file.
    Upload(String),
    /// `download_file` was called with the given key.
    Download(String),
}

#[derive(Debug, Default)]
struct MemoryStorageState {
    entries: Vec<RemoteFileEntry>,
    contents: BTreeMap<String, Vec<u8>>,
    next_id: u64,
    failing_uploads: HashSet<String>,
    list_failure: bool,
    download_failure: bool,
    calls: Vec<MemoryServiceCall>,
}

#[derive(Debug, Clone, Default)]
/// In-memory file store implementing [`FileStorageService`].
///
/// Clones share the same backing state so a test can keep a handle while the runtime owns
/// another.
pub struct MemoryFileStorageService {
    inner: Rc<RefCell<MemoryStorageState>>,
}

impl MemoryFileStorageService {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a stored file and returns its entry.
    pub fn insert(&self, name: &str, uploaded_at: &str, bytes: Vec<u8>) -> RemoteFileEntry {
        let mut state = self.inner.borrow_mut();
        state.next_id += 1;
        let entry = RemoteFileEntry {
            id: format!("mem-{}", state.next_id),
            name: name.to_string(),
            uploaded_at: uploaded_at.to_string(),
            key: format!("{}-{name}", state.next_id),
        };
        state.contents.insert(entry.key.clone(), bytes);
        state.entries.push(entry.clone());
        entry
    }

    /// Makes every upload of a file named `name` fail.
    pub fn fail_uploads_named(&self, name: &str) {
        self.inner
            .borrow_mut()
            .failing_uploads
            .insert(name.to_string());
    }

    /// Toggles failure of `list_files`.
    pub fn set_list_failure(&self, fail: bool) {
        self.inner.borrow_mut().list_failure = fail;
    }

    /// Toggles failure of `download_file`.
    pub fn set_download_failure(&self, fail: bool) {
        self.inner.borrow_mut().download_failure = fail;
    }

    /// Calls observed so far, in order.
    pub fn calls(&self) -> Vec<MemoryServiceCall> {
        self.inner.borrow().calls.clone()
    }

    /// Number of `list_files` calls observed.
    pub fn list_count(&self) -> usize {
        self.count(|call| matches!(call, MemoryServiceCall::List))
    }

    /// Number of `upload_file` calls observed.
    pub fn upload_count(&self) -> usize {
        self.count(|call| matches!(call, MemoryServiceCall::Upload(_)))
    }

    /// Currently stored entries in insertion order.
    pub fn entries(&self) -> Vec<RemoteFileEntry> {
        self.inner.borrow().entries.clone()
    }

    fn count(&self, pred: impl Fn(&MemoryServiceCall) -> bool) -> usize {
        self.inner.borrow().calls.iter().filter(|call| pred(call)).count()
    }

    fn record(&self, call: MemoryServiceCall) {
        self.inner.borrow_mut().calls.push(call);
    }
}

impl FileStorageService for MemoryFileStorageService {
    fn list_files<'a>(&'a self) -> FileServiceFuture<'a, Result<Vec<RemoteFileEntry>, ServiceError>> {
        Box::pin(async move {
            self.record(MemoryServiceCall::List);
            let state = self.inner.borrow();
            if state.list_failure {
                return Err(ServiceError::Simulated("list".to_string()));
            }
            Ok(state.entries.clone())
        })
    }

    fn upload_file<'a>(
        &'a self,
        file: &'a UploadFile,
        on_progress: &'a dyn Fn(TransferProgress),
    ) -> FileServiceFuture<'a, Result<(), ServiceError>> {
        Box::pin(async move {
            self.record(MemoryServiceCall::Upload(file.name.clone()));
            let total = file.size_bytes;
            on_progress(TransferProgress::new(total / 2, total));
            if self.inner.borrow().failing_uploads.contains(&file.name) {
                return Err(ServiceError::Simulated(format!("upload {}", file.name)));
            }
            on_progress(TransferProgress::new(total, total));

            let bytes = match &file.body {
                UploadBody::Bytes(bytes) => bytes.clone(),
                UploadBody::Browser(_) => Vec::new(),
            };
            self.insert(&file.name, &now_rfc3339(), bytes);
            Ok(())
        })
    }

    fn download_file<'a>(
        &'a self,
        storage_key: &'a str,
    ) -> FileServiceFuture<'a, Result<Vec<u8>, ServiceError>> {
        Box::pin(async move {
            self.record(MemoryServiceCall::Download(storage_key.to_string()));
            let state = self.inner.borrow();
            if state.download_failure {
                return Err(ServiceError::Simulated(format!("download {storage_key}")));
            }
            state
                .contents
                .get(storage_key)
                .cloned()
                .ok_or_else(|| ServiceError::Status {
                    url: format!("memory://download/{storage_key}"),
                    status: 404,
                })
        })
    }
}
