//! Transport bridge for the browser adapters.
//!
//! Calls are routed to the target-specific implementation while keeping one API for the
//! storage and viewer adapters.

use std::time::Duration;

use file_service::{RemoteFileEntry, ServiceError, TransferProgress, UploadFile};

#[cfg(not(target_arch = "wasm32"))]
mod non_wasm;
#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(not(target_arch = "wasm32"))]
use non_wasm as imp;
#[cfg(target_arch = "wasm32")]
use wasm as imp;

pub async fn list_files(url: &str) -> Result<Vec<RemoteFileEntry>, ServiceError> {
    imp::list_files(url).await
}

pub async fn upload_file(
    url: &str,
    file: &UploadFile,
    on_progress: &dyn Fn(TransferProgress),
) -> Result<(), ServiceError> {
    imp::upload_file(url, file, on_progress).await
}

pub async fn download_file(url: &str) -> Result<Vec<u8>, ServiceError> {
    imp::download_file(url).await
}

pub fn create_object_url(bytes: &[u8], mime_type: &str) -> Result<String, ServiceError> {
    imp::create_object_url(bytes, mime_type)
}

pub fn revoke_object_url(url: &str) {
    imp::revoke_object_url(url)
}

pub fn open_in_new_tab(url: &str) -> Result<(), ServiceError> {
    imp::open_in_new_tab(url)
}

/// Runs `release` after `delay`. Without a timer, whatever it owns is released immediately.
pub fn release_after(release: Box<dyn FnOnce()>, delay: Duration) {
    imp::release_after(release, delay)
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;
    use pretty_assertions::assert_eq;

    use super::*;

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn transport_public_api_non_wasm_parity() {
        let expected = ServiceError::Unavailable("file storage API");

        assert_eq!(
            block_on(list_files("http://localhost:5000/files")).expect_err("list should fail"),
            expected
        );
        let file = UploadFile::from_bytes("a.txt", b"hello".to_vec());
        assert_eq!(
            block_on(upload_file("http://localhost:5000/files/upload", &file, &|_| {}))
                .expect_err("upload should fail"),
            expected
        );
        assert_eq!(
            block_on(download_file("http://localhost:5000/files/download/k"))
                .expect_err("download should fail"),
            expected
        );
        assert_eq!(
            create_object_url(b"x", "text/plain").expect_err("object url should fail"),
            ServiceError::Unavailable("object URLs")
        );
        assert!(open_in_new_tab("blob:x").is_err());
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn release_after_runs_immediately_without_timer() {
        use std::{cell::Cell, rc::Rc};

        let released = Rc::new(Cell::new(false));
        let flag = released.clone();
        release_after(Box::new(move || flag.set(true)), Duration::from_secs(60));
        assert!(released.get());
    }
}
