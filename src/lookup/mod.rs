//! App metadata from the iTunes lookup endpoint.

mod api;
mod model;
mod wire;

pub use model::AppInfo;

use crate::core::{AppId, AvClient, AvError, RetryConfig};

/// Fetches the metadata for a single app.
///
/// # Errors
///
/// Returns [`AvError::NotFound`] when the lookup has no result for the id,
/// or another `AvError` if the request fails or the response cannot be
/// parsed.
pub async fn lookup(client: &AvClient, app_id: AppId) -> Result<AppInfo, AvError> {
    LookupBuilder::new(client, app_id).fetch().await
}

/// A builder for looking up app metadata.
#[derive(Debug)]
pub struct LookupBuilder {
    client: AvClient,
    app_id: AppId,
    retry_override: Option<RetryConfig>,
}

impl LookupBuilder {
    /// Creates a new `LookupBuilder` for the given app.
    pub fn new(client: &AvClient, app_id: AppId) -> Self {
        Self {
            client: client.clone(),
            app_id,
            retry_override: None,
        }
    }

    /// Overrides the client's default retry policy for this call.
    #[must_use]
    pub fn retry_policy(mut self, cfg: Option<RetryConfig>) -> Self {
        self.retry_override = cfg;
        self
    }

    /// Executes the lookup.
    ///
    /// # Errors
    ///
    /// See [`lookup`].
    pub async fn fetch(self) -> Result<AppInfo, AvError> {
        api::fetch_app_info(&self.client, &self.app_id, self.retry_override.as_ref()).await
    }
}
