//! Mapping from the storage API's list response to displayable [`FileRecord`]s.

use std::collections::HashSet;

use file_service::RemoteFileEntry;
use jiff::{tz::TimeZone, Timestamp};

use crate::{
    file_kind::{mime_type_for, FileCategory},
    model::FileRecord,
};

/// Converts a list response into records, preserving server order.
///
/// A repeated `_id` keeps its first occurrence so ids stay unique within the list.
pub fn records_from_entries(entries: Vec<RemoteFileEntry>) -> Vec<FileRecord> {
    let mut seen = HashSet::new();
    entries
        .into_iter()
        .filter(|entry| seen.insert(entry.id.clone()))
        .map(record_from_entry)
        .collect()
}

/// Maps one list entry to a record, inferring MIME type and category from its name.
pub fn record_from_entry(entry: RemoteFileEntry) -> FileRecord {
    FileRecord {
        category: FileCategory::from_file_name(&entry.name),
        mime_type: mime_type_for(&entry.name),
        upload_date: upload_day(&entry.uploaded_at),
        id: entry.id,
        name: entry.name,
        storage_key: entry.key,
    }
}

/// UTC calendar day (`YYYY-MM-DD`) of an RFC 3339 timestamp.
///
/// Unparsable input falls back to the text before `T`.
pub fn upload_day(uploaded_at: &str) -> String {
    match uploaded_at.trim().parse::<Timestamp>() {
        Ok(timestamp) => timestamp.to_zoned(TimeZone::UTC).date().to_string(),
        Err(_) => uploaded_at
            .split_once('T')
            .map(|(day, _)| day)
            .unwrap_or(uploaded_at)
            .trim()
            .to_string(),
    }
}
