//! Service bundle injected into the upload runtime.

use std::rc::Rc;

use crate::{FileStorageService, FileViewer, MemoryFileStorageService, MemoryFileViewer};

/// Runtime-selected service bundle.
///
/// All environment-specific adapter selection happens before this bundle crosses into
/// `upload_runtime`, which keeps the runtime independent of browser adapter types.
#[derive(Clone)]
pub struct FileServices {
    /// Remote list/upload/download API.
    pub storage: Rc<dyn FileStorageService>,
    /// Presenter for downloaded payloads.
    pub viewer: Rc<dyn FileViewer>,
}

impl FileServices {
    /// Bundles concrete adapters.
    pub fn new(storage: Rc<dyn FileStorageService>, viewer: Rc<dyn FileViewer>) -> Self {
        Self { storage, viewer }
    }

    /// Bundles in-memory adapters, returning handles that share their state.
    pub fn memory() -> (Self, MemoryFileStorageService, MemoryFileViewer) {
        let storage = MemoryFileStorageService::new();
        let viewer = MemoryFileViewer::default();
        let services = Self::new(Rc::new(storage.clone()), Rc::new(viewer.clone()));
        (services, storage, viewer)
    }
}
