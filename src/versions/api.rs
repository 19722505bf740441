use url::Url;

use crate::core::{AppId, AvClient, AvError, RetryConfig};
use crate::versions::{
    fetch::{collect_chunks, fetch_with_retry},
    model::{VersionHistory, VersionRecord, normalize},
    wire::{RawVersion, parse_created_at},
};

/// Fetch the version history for an app: chunked collection from the
/// primary source, single-page fallback on any primary failure, then
/// normalization.
///
/// The fallback runs only in the primary error arm, so a fallback failure
/// after a primary success cannot occur. When both sources fail, the
/// fallback's error propagates; its classification is what the caller maps
/// to an HTTP status.
pub(super) async fn fetch_versions(
    client: &AvClient,
    app_id: &AppId,
    page: u32,
    limit: u32,
    max_chunks: u32,
    retry_override: Option<&RetryConfig>,
) -> Result<VersionHistory, AvError> {
    let retry = retry_override.unwrap_or_else(|| client.retry());

    let primary = versions_url(client.base_primary(), app_id, page, limit);
    let primary_run = async {
        let collected = collect_chunks(client, &primary, app_id, limit, max_chunks, retry).await?;
        let records = records_from_raw(collected.raw);
        if records.is_empty() {
            return Err(AvError::NoData {
                app_id: app_id.to_string(),
            });
        }
        Ok((records, collected.chunks, collected.has_more))
    };

    let primary_err = match primary_run.await {
        Ok((records, chunks, has_more)) => {
            return Ok(normalize(records, chunks, has_more));
        }
        Err(e) => e,
    };

    #[cfg(feature = "tracing")]
    tracing::warn!(
        %app_id,
        error = %primary_err,
        "primary version source failed, trying fallback"
    );
    #[cfg(not(feature = "tracing"))]
    let _ = &primary_err;

    // Fallback policy: one retry-wrapped call, no chunk loop.
    let fallback = versions_url(client.base_fallback(), app_id, page, limit);
    let value = fetch_with_retry(client, &fallback, retry).await?;

    let records = match value.as_array() {
        Some(items) => records_from_raw(
            items
                .iter()
                .filter_map(|item| serde_json::from_value::<RawVersion>(item.clone()).ok())
                .collect(),
        ),
        None => Vec::new(),
    };

    if records.is_empty() {
        return Err(AvError::NoData {
            app_id: app_id.to_string(),
        });
    }

    Ok(normalize(records, 1, false))
}

fn versions_url(base: &Url, app_id: &AppId, page: u32, limit: u32) -> Url {
    let mut url = base.clone();
    url.query_pairs_mut()
        .append_pair("id", app_id.as_str())
        .append_pair("page", &page.to_string())
        .append_pair("limit", &limit.to_string());
    url
}

/// Project raw entries into the public model, dropping entries without an
/// identifier or a parseable timestamp.
fn records_from_raw(raw: Vec<RawVersion>) -> Vec<VersionRecord> {
    raw.into_iter()
        .filter_map(|entry| {
            let external_id = entry.external_identifier?.into_string();
            let created_at = parse_created_at(&entry.created_at?)?;
            Some(VersionRecord {
                version: entry.bundle_version.unwrap_or_else(|| "N/A".to_string()),
                created_at,
                external_id,
                release_notes: entry.release_notes,
            })
        })
        .collect()
}
