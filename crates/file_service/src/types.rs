//! Wire and transfer types shared by service contracts and adapters.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// One element of the `GET /files` response.
pub struct RemoteFileEntry {
    /// Server-assigned unique id.
    #[serde(rename = "_id")]
    pub id: String,
    /// Original filename.
    pub name: String,
    /// Upload instant as an ISO-8601 timestamp.
    #[serde(rename = "uploadedAt", default)]
    pub uploaded_at: String,
    /// Opaque storage handle used by the download endpoint.
    #[serde(default)]
    pub key: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Payload of an [`UploadFile`].
pub enum UploadBody {
    /// Bytes already held in memory.
    Bytes(Vec<u8>),
    /// Browser `File`/`Blob` handle, sent without copying into wasm memory.
    Browser(js_sys::Object),
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// A single file selected for upload.
pub struct UploadFile {
    /// Filename reported to the server.
    pub name: String,
    /// Size in bytes, used for batch-wide progress weighting.
    pub size_bytes: u64,
    /// MIME type reported by the picker, possibly empty.
    pub mime_type: String,
    /// File contents.
    pub body: UploadBody,
}

impl UploadFile {
    /// Builds an upload from in-memory bytes.
    pub fn from_bytes(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            size_bytes: bytes.len() as u64,
            mime_type: String::new(),
            body: UploadBody::Bytes(bytes),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
/// Bytes sent so far for the file currently in flight.
pub struct TransferProgress {
    /// Bytes sent.
    pub loaded: u64,
    /// Total bytes, `0` when the transport cannot tell.
    pub total: u64,
}

impl TransferProgress {
    /// Creates a progress sample.
    pub const fn new(loaded: u64, total: u64) -> Self {
        Self { loaded, total }
    }

    /// Rounded completion percentage, clamped to `0..=100`. Unknown totals report `0`.
    pub fn percent(self) -> u8 {
        if self.total == 0 {
            return 0;
        }
        let loaded = self.loaded.min(self.total) as f64;
        ((loaded * 100.0) / self.total as f64).round() as u8
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn remote_entries_decode_from_service_json() {
        let raw = r#"[
            {"_id":"65f1","name":"report.pdf","uploadedAt":"2024-03-09T22:15:00.000Z","key":"k1","__v":0},
            {"_id":"65f2","name":"notes.txt","uploadedAt":"2024-03-10T08:00:00Z"}
        ]"#;
        let entries: Vec<RemoteFileEntry> = serde_json::from_str(raw).expect("decode list");
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].id, "65f1");
        assert_eq!(entries[0].key, "k1");
        assert_eq!(entries[1].key, "");
    }

    #[test]
    fn transfer_percent_rounds_and_clamps() {
        assert_eq!(TransferProgress::new(1, 3).percent(), 33);
        assert_eq!(TransferProgress::new(2, 3).percent(), 67);
        assert_eq!(TransferProgress::new(10, 4).percent(), 100);
        assert_eq!(TransferProgress::new(10, 0).percent(), 0);
    }
}
