use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

/// A single historical release entry, immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VersionRecord {
    /// The version label, e.g. `"1.2.3"`. `"N/A"` when upstream omits it.
    pub version: String,
    /// When the release entry was created upstream.
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    /// Opaque identifier assigned by the upstream source; the dedup key.
    #[serde(rename = "externalId")]
    pub external_id: String,
    /// Release notes, when the source provides them.
    #[serde(rename = "releaseNotes", skip_serializing_if = "Option::is_none")]
    pub release_notes: Option<String>,
}

/// Counters describing how a [`VersionHistory`] was assembled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HistoryMetadata {
    /// Number of records after de-duplication; always equals `data.len()`.
    pub total: usize,
    /// How many chunk requests were issued against the source that answered.
    #[serde(rename = "chunksFetched")]
    pub chunks_fetched: u32,
    /// Whether the source may hold more records beyond the chunk cap.
    #[serde(rename = "hasMore")]
    pub has_more: bool,
}

/// The normalized result of a version-history fetch: de-duplicated records,
/// newest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VersionHistory {
    /// Version records sorted non-increasing by `created_at`.
    pub data: Vec<VersionRecord>,
    /// Assembly metadata.
    pub metadata: HistoryMetadata,
}

/// Collapse duplicates and order the accumulated records.
///
/// Duplicate `external_id`s overwrite in place (last write wins, first-seen
/// position kept): upstream order is roughly chronological-ascending within
/// a chunk, so a later duplicate is a refinement of the earlier entry. The
/// sort is stable, so records sharing a timestamp keep their relative order.
pub(crate) fn normalize(
    records: Vec<VersionRecord>,
    chunks_fetched: u32,
    has_more: bool,
) -> VersionHistory {
    let mut slots: HashMap<String, usize> = HashMap::with_capacity(records.len());
    let mut deduped: Vec<VersionRecord> = Vec::with_capacity(records.len());

    for record in records {
        match slots.get(&record.external_id) {
            Some(&i) => deduped[i] = record,
            None => {
                slots.insert(record.external_id.clone(), deduped.len());
                deduped.push(record);
            }
        }
    }

    deduped.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    let total = deduped.len();
    VersionHistory {
        data: deduped,
        metadata: HistoryMetadata {
            total,
            chunks_fetched,
            has_more,
        },
    }
}
