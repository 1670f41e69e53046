//! Object-URL backed viewer that opens downloaded payloads in a new browser tab.

use std::time::Duration;

use file_service::{FileViewer, ServiceError};

use crate::bridge;

/// How long an opened object URL stays valid before it is revoked.
///
/// The new tab resolves the URL asynchronously, so revoking right after `window.open` would race
/// the load.
pub const OBJECT_URL_RELEASE_DELAY: Duration = Duration::from_secs(60);

/// Owned `blob:` URL that is revoked when dropped.
pub struct ObjectUrlLease {
    url: String,
    revoke: fn(&str),
}

impl ObjectUrlLease {
    /// Allocates an object URL for `bytes`.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Viewer`] when the browser refuses the allocation, or
    /// [`ServiceError::Unavailable`] off-browser.
    pub fn acquire(bytes: &[u8], mime_type: &str) -> Result<Self, ServiceError> {
        let url = bridge::create_object_url(bytes, mime_type)?;
        Ok(Self::from_parts(url, bridge::revoke_object_url))
    }

    pub(crate) fn from_parts(url: String, revoke: fn(&str)) -> Self {
        Self { url, revoke }
    }

    /// The leased URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Hands the lease to a timer that drops it after `delay`.
    pub fn release_after(self, delay: Duration) {
        bridge::release_after(Box::new(move || drop(self)), delay);
    }
}

impl Drop for ObjectUrlLease {
    fn drop(&mut self) {
        (self.revoke)(&self.url);
    }
}

impl std::fmt::Debug for ObjectUrlLease {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObjectUrlLease").field("url", &self.url).finish()
    }
}

#[derive(Debug, Clone, Copy, Default)]
/// Browser viewer: `blob:` URL + `window.open(url, "_blank")`.
pub struct WebFileViewer;

impl WebFileViewer {
    fn present(
        lease: ObjectUrlLease,
        open: impl FnOnce(&str) -> Result<(), ServiceError>,
    ) -> Result<(), ServiceError> {
        // On error the lease drops here and the URL is revoked at once.
        open(lease.url())?;
        lease.release_after(OBJECT_URL_RELEASE_DELAY);
        Ok(())
    }
}

impl FileViewer for WebFileViewer {
    fn open_file(&self, _name: &str, mime_type: &str, bytes: Vec<u8>) -> Result<(), ServiceError> {
        let lease = ObjectUrlLease::acquire(&bytes, mime_type)?;
        Self::present(lease, bridge::open_in_new_tab)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use pretty_assertions::assert_eq;

    use super::*;

    thread_local! {
        static REVOKED: RefCell<Vec<String>> = const { RefCell::new(Vec::new()) };
    }

    fn record_revoke(url: &str) {
        REVOKED.with(|revoked| revoked.borrow_mut().push(url.to_string()));
    }

    fn take_revoked() -> Vec<String> {
        REVOKED.with(|revoked| std::mem::take(&mut *revoked.borrow_mut()))
    }

    #[test]
    fn lease_revokes_on_drop() {
        take_revoked();
        {
            let lease = ObjectUrlLease::from_parts("blob:one".to_string(), record_revoke);
            assert_eq!(lease.url(), "blob:one");
        }
        assert_eq!(take_revoked(), vec!["blob:one".to_string()]);
    }

    #[test]
    fn failed_open_revokes_immediately() {
        take_revoked();
        let lease = ObjectUrlLease::from_parts("blob:two".to_string(), record_revoke);
        let err = WebFileViewer::present(lease, |_| {
            Err(ServiceError::Viewer("blocked".to_string()))
        })
        .expect_err("open fails");
        assert_eq!(err, ServiceError::Viewer("blocked".to_string()));
        assert_eq!(take_revoked(), vec!["blob:two".to_string()]);
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn successful_open_still_releases_the_lease() {
        take_revoked();
        let lease = ObjectUrlLease::from_parts("blob:three".to_string(), record_revoke);
        let opened = RefCell::new(None);
        WebFileViewer::present(lease, |url| {
            *opened.borrow_mut() = Some(url.to_string());
            Ok(())
        })
        .expect("open");
        assert_eq!(opened.into_inner(), Some("blob:three".to_string()));
        // Native builds have no timer, so the deferred release runs inline.
        assert_eq!(take_revoked(), vec!["blob:three".to_string()]);
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn viewer_is_unavailable_off_browser() {
        assert_eq!(
            WebFileViewer
                .open_file("a.pdf", "application/pdf", vec![1])
                .expect_err("no browser"),
            ServiceError::Unavailable("object URLs")
        );
    }
}
