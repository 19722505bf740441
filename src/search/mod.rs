//! Software search against the iTunes search endpoint.

use serde::{Deserialize, Serialize};

use crate::core::{AvClient, AvError, RetryConfig};

/// One software hit from the search endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AppSummary {
    /// The numeric App Store track id.
    pub track_id: i64,
    /// Display name of the app.
    pub name: String,
    /// Developer / seller name.
    pub developer: Option<String>,
    /// Current version label.
    pub version: Option<String>,
    /// Small artwork URL for list rendering.
    pub artwork_url: Option<String>,
}

/// Searches the App Store for software matching a term.
///
/// # Errors
///
/// Returns `AvError` if the network request fails or the response cannot be
/// parsed.
pub async fn search(client: &AvClient, term: &str) -> Result<Vec<AppSummary>, AvError> {
    SearchBuilder::new(client, term).fetch().await
}

/// A builder for searching the App Store.
#[derive(Debug)]
pub struct SearchBuilder {
    client: AvClient,
    term: String,
    limit: u32,
    country: Option<String>,
    retry_override: Option<RetryConfig>,
}

impl SearchBuilder {
    /// Creates a new `SearchBuilder` for a search term.
    pub fn new(client: &AvClient, term: impl Into<String>) -> Self {
        Self {
            client: client.clone(),
            term: term.into(),
            limit: 10,
            country: None,
            retry_override: None,
        }
    }

    /// Sets the maximum number of results to return. Default: 10.
    #[must_use]
    pub const fn limit(mut self, n: u32) -> Self {
        self.limit = n;
        self
    }

    /// Restricts results to a storefront country code (e.g. `"us"`).
    #[must_use]
    pub fn country(mut self, code: impl Into<String>) -> Self {
        self.country = Some(code.into());
        self
    }

    /// Overrides the client's default retry policy for this call.
    #[must_use]
    pub fn retry_policy(mut self, cfg: Option<RetryConfig>) -> Self {
        self.retry_override = cfg;
        self
    }

    /// Executes the search.
    ///
    /// # Errors
    ///
    /// See [`search`].
    pub async fn fetch(self) -> Result<Vec<AppSummary>, AvError> {
        let mut url = self.client.base_search().clone();
        {
            let mut qp = url.query_pairs_mut();
            qp.append_pair("term", &self.term);
            qp.append_pair("entity", "software");
            qp.append_pair("limit", &self.limit.to_string());
            if let Some(c) = &self.country {
                qp.append_pair("country", c);
            }
        }

        let req = self
            .client
            .http()
            .get(url.clone())
            .header("accept", "application/json");
        let resp = self
            .client
            .send_with_retry(req, self.retry_override.as_ref())
            .await?;

        if !resp.status().is_success() {
            return Err(AvError::Status {
                status: resp.status().as_u16(),
                url: url.to_string(),
            });
        }

        let body = resp.text().await?;
        parse_search_body(&body)
    }
}

fn parse_search_body(body: &str) -> Result<Vec<AppSummary>, AvError> {
    let env: SearchEnvelope = serde_json::from_str(body)
        .map_err(|e| AvError::Data(format!("search parse error: {e}")))?;

    Ok(env
        .results
        .unwrap_or_default()
        .into_iter()
        .filter_map(|hit| {
            Some(AppSummary {
                track_id: hit.track_id?,
                name: hit.track_name?,
                developer: hit.artist_name,
                version: hit.version,
                artwork_url: hit.artwork_url_60,
            })
        })
        .collect())
}

/* ------------- Minimal serde mapping of /search ------------- */

#[derive(Deserialize)]
struct SearchEnvelope {
    #[allow(dead_code)]
    #[serde(rename = "resultCount")]
    result_count: Option<u32>,
    results: Option<Vec<SearchHit>>,
}

#[derive(Deserialize)]
struct SearchHit {
    #[serde(rename = "trackId")]
    track_id: Option<i64>,
    #[serde(rename = "trackName")]
    track_name: Option<String>,
    #[serde(rename = "artistName")]
    artist_name: Option<String>,
    version: Option<String>,
    #[serde(rename = "artworkUrl60")]
    artwork_url_60: Option<String>,
}
