//! Contract for presenting downloaded file bytes to the user.

use std::{cell::RefCell, rc::Rc};

use crate::ServiceError;

/// Host service that opens a downloaded payload in a new view.
///
/// Implementations own whatever transient handle they allocate for the payload and must release
/// it on every exit path.
pub trait FileViewer {
    /// Opens `bytes` as a file named `name` with the given MIME type.
    fn open_file(&self, name: &str, mime_type: &str, bytes: Vec<u8>) -> Result<(), ServiceError>;
}

#[derive(Debug, Clone, Copy, Default)]
/// Viewer for builds without a browser window. Always fails.
pub struct NoopFileViewer;

impl FileViewer for NoopFileViewer {
    fn open_file(&self, _name: &str, _mime_type: &str, _bytes: Vec<u8>) -> Result<(), ServiceError> {
        Err(ServiceError::Unavailable("file viewer"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// One payload handed to a [`MemoryFileViewer`].
pub struct OpenedFile {
    /// Filename shown to the user.
    pub name: String,
    /// MIME type the payload was opened with.
    pub mime_type: String,
    /// Payload size.
    pub byte_len: usize,
}

#[derive(Debug, Clone, Default)]
/// Viewer that records every opened payload instead of displaying it.
pub struct MemoryFileViewer {
    opened: Rc<RefCell<Vec<OpenedFile>>>,
    fail: Rc<RefCell<bool>>,
}

impl MemoryFileViewer {
    /// Makes subsequent opens fail.
    pub fn set_failure(&self, fail: bool) {
        *self.fail.borrow_mut() = fail;
    }

    /// Payloads opened so far.
    pub fn opened(&self) -> Vec<OpenedFile> {
        self.opened.borrow().clone()
    }
}

impl FileViewer for MemoryFileViewer {
    fn open_file(&self, name: &str, mime_type: &str, bytes: Vec<u8>) -> Result<(), ServiceError> {
        if *self.fail.borrow() {
            return Err(ServiceError::Viewer(format!("cannot open {name}")));
        }
        self.opened.borrow_mut().push(OpenedFile {
            name: name.to_string(),
            mime_type: mime_type.to_string(),
            byte_len: bytes.len(),
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_viewer_records_and_fails_on_demand() {
        let viewer = MemoryFileViewer::default();
        viewer
            .open_file("a.pdf", "application/pdf", vec![1, 2])
            .expect("open");
        viewer.set_failure(true);
        assert!(viewer.open_file("b.pdf", "application/pdf", vec![]).is_err());

        assert_eq!(
            viewer.opened(),
            vec![OpenedFile {
                name: "a.pdf".to_string(),
                mime_type: "application/pdf".to_string(),
                byte_len: 2,
            }]
        );
        assert!(NoopFileViewer.open_file("c", "text/plain", vec![]).is_err());
    }
}
