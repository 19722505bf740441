use url::Url;

use crate::core::{AppId, AvClient, AvError, RetryConfig};
use crate::versions::wire::RawVersion;

/// Issue a single GET against one upstream URL and classify the outcome.
///
/// Classification order: transport timeout, non-2xx status, empty body,
/// unparseable body. An unparseable body that contains one of the client's
/// redirect markers becomes [`AvError::UpstreamRedirect`], which the retry
/// layer treats as terminal. Dropping the returned future aborts the
/// in-flight request.
pub(super) async fn fetch_once(
    client: &AvClient,
    url: &Url,
) -> Result<serde_json::Value, AvError> {
    let resp = client
        .http()
        .get(url.clone())
        .header("accept", "application/json")
        .send()
        .await
        .map_err(|e| classify_transport(e, url))?;

    if !resp.status().is_success() {
        return Err(AvError::Status {
            status: resp.status().as_u16(),
            url: url.to_string(),
        });
    }

    let body = resp
        .text()
        .await
        .map_err(|e| classify_transport(e, url))?;

    if body.trim().is_empty() {
        return Err(AvError::EmptyBody {
            url: url.to_string(),
        });
    }

    match serde_json::from_str(&body) {
        Ok(value) => Ok(value),
        Err(_) if looks_like_redirect(&body, client.redirect_markers()) => {
            Err(AvError::UpstreamRedirect {
                url: url.to_string(),
            })
        }
        Err(_) => Err(AvError::MalformedBody {
            url: url.to_string(),
        }),
    }
}

fn classify_transport(err: reqwest::Error, url: &Url) -> AvError {
    if err.is_timeout() {
        AvError::Timeout {
            url: url.to_string(),
        }
    } else {
        AvError::Http(err)
    }
}

fn looks_like_redirect(body: &str, markers: &[String]) -> bool {
    let haystack = body.to_ascii_lowercase();
    markers
        .iter()
        .any(|m| haystack.contains(&m.to_ascii_lowercase()))
}

/// Drive [`fetch_once`] under the retry budget.
///
/// Every failure except [`AvError::UpstreamRedirect`] is retried after a
/// backoff delay until the budget is spent; the redirect classification
/// propagates immediately since the upstream is signaling that no real data
/// lives at this URL. The attempt counter is local to this call.
pub(super) async fn fetch_with_retry(
    client: &AvClient,
    url: &Url,
    retry: &RetryConfig,
) -> Result<serde_json::Value, AvError> {
    let attempts = retry.attempts();
    let mut attempt = 1u32;
    loop {
        match fetch_once(client, url).await {
            Ok(value) => return Ok(value),
            Err(e @ AvError::UpstreamRedirect { .. }) => return Err(e),
            Err(e) => {
                if attempt >= attempts {
                    return Err(e);
                }
                #[cfg(feature = "tracing")]
                tracing::debug!(%url, error = %e, attempt, "retrying version source fetch");
            }
        }
        tokio::time::sleep(retry.backoff.delay_for(attempt)).await;
        attempt += 1;
    }
}

/// What a chunked collection run produced.
pub(super) struct Collected {
    pub(super) raw: Vec<RawVersion>,
    pub(super) chunks: u32,
    pub(super) has_more: bool,
}

/// Walk the primary source chunk by chunk, accumulating raw records.
///
/// Stops on the first short page (the source has no more), on an empty or
/// non-array response, or once the chunk cap is hit. A full final page at
/// the cap leaves `has_more` set. An accumulator that ends empty is
/// [`AvError::NoData`], terminal for this source.
pub(super) async fn collect_chunks(
    client: &AvClient,
    base: &Url,
    app_id: &AppId,
    limit: u32,
    max_chunks: u32,
    retry: &RetryConfig,
) -> Result<Collected, AvError> {
    let mut raw: Vec<RawVersion> = Vec::new();
    let mut chunks = 0u32;
    let mut has_more = false;

    for chunk in 1..=max_chunks {
        let mut url = base.clone();
        url.query_pairs_mut()
            .append_pair("chunk", &chunk.to_string());

        let value = fetch_with_retry(client, &url, retry).await?;
        chunks = chunk;

        let Some(items) = value.as_array() else {
            has_more = false;
            break;
        };
        if items.is_empty() {
            has_more = false;
            break;
        }

        let page_len = items.len();
        raw.extend(
            items
                .iter()
                .filter_map(|item| serde_json::from_value::<RawVersion>(item.clone()).ok()),
        );

        if (page_len as u32) < limit {
            has_more = false;
            break;
        }
        // Full page: more may exist whether or not the cap lets us ask.
        has_more = true;
    }

    if raw.is_empty() {
        return Err(AvError::NoData {
            app_id: app_id.to_string(),
        });
    }

    Ok(Collected {
        raw,
        chunks,
        has_more,
    })
}
