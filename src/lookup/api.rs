use chrono::{DateTime, Utc};

use crate::{
    core::{AppId, AvClient, AvError, RetryConfig},
    lookup::{model::AppInfo, wire},
};

pub(super) async fn fetch_app_info(
    client: &AvClient,
    app_id: &AppId,
    retry_override: Option<&RetryConfig>,
) -> Result<AppInfo, AvError> {
    let mut url = client.base_lookup().clone();
    url.query_pairs_mut().append_pair("id", app_id.as_str());

    let req = client
        .http()
        .get(url.clone())
        .header("accept", "application/json");
    let resp = client.send_with_retry(req, retry_override).await?;

    if !resp.status().is_success() {
        return Err(AvError::Status {
            status: resp.status().as_u16(),
            url: url.to_string(),
        });
    }

    let body = resp.text().await?;
    let envelope: wire::LookupEnvelope = serde_json::from_str(&body)
        .map_err(|e| AvError::Data(format!("lookup parse error: {e}")))?;

    let raw = envelope
        .results
        .unwrap_or_default()
        .into_iter()
        .next()
        .ok_or(AvError::NotFound {
            url: url.to_string(),
        })?;

    let track_id = raw
        .track_id
        .ok_or_else(|| AvError::Data("lookup result missing trackId".into()))?;
    let name = raw
        .track_name
        .ok_or_else(|| AvError::Data("lookup result missing trackName".into()))?;

    Ok(AppInfo {
        track_id,
        name,
        developer: raw.artist_name,
        version: raw.version,
        bundle_id: raw.bundle_id,
        release_notes: raw.release_notes,
        first_released: raw.release_date.as_deref().and_then(parse_rfc3339),
        current_version_released: raw
            .current_version_release_date
            .as_deref()
            .and_then(parse_rfc3339),
        file_size_bytes: raw.file_size_bytes.and_then(|s| s.parse().ok()),
        average_rating: raw.average_user_rating,
        artwork_url: raw
            .artwork_url_512
            .or(raw.artwork_url_100)
            .or(raw.artwork_url_60),
    })
}

fn parse_rfc3339(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}
