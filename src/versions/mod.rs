//! App version history from unreliable third-party sources.
//!
//! The pipeline layers retries, per-attempt timeouts, chunked pagination,
//! and primary→fallback failover on top of plain GETs, then de-duplicates
//! and orders whatever the sources returned.

mod api;
mod fetch;
mod model;
mod wire;

pub use model::{HistoryMetadata, VersionHistory, VersionRecord};

use crate::core::{AppId, AvClient, AvError, RetryConfig};

/// A builder for fetching the version history of a single app.
#[derive(Debug)]
pub struct VersionsBuilder {
    client: AvClient,
    app_id: AppId,
    page: u32,
    limit: u32,
    max_chunks: u32,
    retry_override: Option<RetryConfig>,
}

impl VersionsBuilder {
    /// Creates a new `VersionsBuilder` for the given app.
    pub fn new(client: &AvClient, app_id: AppId) -> Self {
        Self {
            client: client.clone(),
            app_id,
            page: 1,
            limit: client.page_limit(),
            max_chunks: client.max_chunks(),
            retry_override: None,
        }
    }

    /// Page hint forwarded to the upstream sources. Default: 1.
    #[must_use]
    pub const fn page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    /// Page size hint forwarded to the upstream sources; also the threshold
    /// below which a chunk counts as the final page. Default: the client's
    /// configured page limit.
    #[must_use]
    pub const fn limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    /// Override the chunk cap for this request only.
    #[must_use]
    pub const fn max_chunks(mut self, n: u32) -> Self {
        self.max_chunks = n;
        self
    }

    /// Overrides the client's default retry policy for this request.
    #[must_use]
    pub fn retry_policy(mut self, cfg: Option<RetryConfig>) -> Self {
        self.retry_override = cfg;
        self
    }

    /// Executes the fetch.
    ///
    /// # Errors
    ///
    /// Returns an error only when both the primary and the fallback source
    /// fail; the error carries the fallback's classification. Use
    /// [`AvError::http_status`](crate::AvError::http_status) to map it for a
    /// caller-facing response.
    pub async fn fetch(self) -> Result<VersionHistory, AvError> {
        api::fetch_versions(
            &self.client,
            &self.app_id,
            self.page,
            self.limit,
            self.max_chunks,
            self.retry_override.as_ref(),
        )
        .await
    }
}
