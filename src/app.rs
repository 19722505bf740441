use crate::core::{AppId, AvClient, AvError, RetryConfig};
use crate::lookup::{AppInfo, LookupBuilder};
use crate::versions::{VersionHistory, VersionsBuilder};

/// A high-level interface for a single App Store app.
///
/// An `App` is created with an [`AvClient`] and a validated [`AppId`], and
/// provides convenient access to the app's metadata and version history.
///
/// # Example
///
/// ```no_run
/// # use appversions_rs::{App, AvClient};
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let client = AvClient::default();
/// let app = App::from_input(&client, "https://apps.apple.com/us/app/example/id364709193")?;
///
/// let info = app.info().await?;
/// println!("{} is at version {:?}", info.name, info.version);
///
/// let history = app.versions().await?;
/// println!("{} known releases", history.metadata.total);
/// # Ok(())
/// # }
/// ```
pub struct App {
    client: AvClient,
    app_id: AppId,
    retry_override: Option<RetryConfig>,
}

impl App {
    /// Creates a new `App` for a validated id.
    pub fn new(client: &AvClient, app_id: AppId) -> Self {
        Self {
            client: client.clone(),
            app_id,
            retry_override: None,
        }
    }

    /// Creates an `App` from free-form input: a numeric id, an App Store
    /// URL, or anything else [`AppId::extract`] understands.
    ///
    /// # Errors
    ///
    /// Returns [`AvError::InvalidAppId`] when no id can be extracted.
    pub fn from_input(client: &AvClient, input: &str) -> Result<Self, AvError> {
        let app_id =
            AppId::extract(input).ok_or_else(|| AvError::InvalidAppId(input.to_string()))?;
        Ok(Self::new(client, app_id))
    }

    /// The id this `App` was created with.
    pub fn app_id(&self) -> &AppId {
        &self.app_id
    }

    /// Overrides the client's default retry policy for all subsequent calls
    /// made through this `App` instance.
    #[must_use]
    pub fn retry_policy(mut self, cfg: Option<RetryConfig>) -> Self {
        self.retry_override = cfg;
        self
    }

    /// Fetches the app's metadata from the lookup endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the app does not exist.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), err, fields(app_id = %self.app_id)))]
    pub async fn info(&self) -> Result<AppInfo, AvError> {
        let mut builder = LookupBuilder::new(&self.client, self.app_id.clone());
        if let Some(cfg) = &self.retry_override {
            builder = builder.retry_policy(Some(cfg.clone()));
        }
        builder.fetch().await
    }

    /// Fetches the app's version history with the client's default page and
    /// limit.
    ///
    /// # Errors
    ///
    /// Returns an error only when both version sources fail.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), err, fields(app_id = %self.app_id)))]
    pub async fn versions(&self) -> Result<VersionHistory, AvError> {
        let mut builder = VersionsBuilder::new(&self.client, self.app_id.clone());
        if let Some(cfg) = &self.retry_override {
            builder = builder.retry_policy(Some(cfg.clone()));
        }
        builder.fetch().await
    }

    /// Fetches the app's version history with explicit pagination hints.
    ///
    /// # Errors
    ///
    /// Returns an error only when both version sources fail.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), err, fields(app_id = %self.app_id)))]
    pub async fn version_history(&self, page: u32, limit: u32) -> Result<VersionHistory, AvError> {
        let mut builder = VersionsBuilder::new(&self.client, self.app_id.clone())
            .page(page)
            .limit(limit);
        if let Some(cfg) = &self.retry_override {
            builder = builder.retry_policy(Some(cfg.clone()));
        }
        builder.fetch().await
    }
}
