//! Public client surface + builder.
//! Endpoint defaults and the UA live in `constants`; retry policy in `retry`.

mod constants;
mod retry;

pub use retry::{Backoff, RetryConfig};

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use url::Url;

use crate::core::AvError;
use constants::{
    DEFAULT_BASE_FALLBACK, DEFAULT_BASE_LOOKUP, DEFAULT_BASE_PRIMARY, DEFAULT_BASE_SEARCH,
    DEFAULT_BASE_VERIFY, REDIRECT_MARKERS, USER_AGENT,
};

/// HTTP client shared by all API modules.
///
/// Cheap to clone; holds only configuration and the underlying
/// `reqwest::Client` connection pool. No response data is cached across
/// calls.
#[derive(Debug, Clone)]
pub struct AvClient {
    http: Client,
    base_primary: Url,
    base_fallback: Url,
    base_lookup: Url,
    base_search: Url,
    base_verify: Url,
    retry: RetryConfig,
    max_chunks: u32,
    page_limit: u32,
    redirect_markers: Arc<Vec<String>>,
}

impl Default for AvClient {
    fn default() -> Self {
        Self::builder().build().expect("default client")
    }
}

impl AvClient {
    /// Create a new builder.
    pub fn builder() -> AvClientBuilder {
        AvClientBuilder::default()
    }

    /* -------- internal getters used by other modules -------- */

    pub(crate) fn http(&self) -> &Client {
        &self.http
    }
    pub(crate) fn base_primary(&self) -> &Url {
        &self.base_primary
    }
    pub(crate) fn base_fallback(&self) -> &Url {
        &self.base_fallback
    }
    pub(crate) fn base_lookup(&self) -> &Url {
        &self.base_lookup
    }
    pub(crate) fn base_search(&self) -> &Url {
        &self.base_search
    }
    pub(crate) fn base_verify(&self) -> &Url {
        &self.base_verify
    }
    pub(crate) fn retry(&self) -> &RetryConfig {
        &self.retry
    }
    pub(crate) fn max_chunks(&self) -> u32 {
        self.max_chunks
    }
    pub(crate) fn page_limit(&self) -> u32 {
        self.page_limit
    }
    pub(crate) fn redirect_markers(&self) -> &[String] {
        &self.redirect_markers
    }

    /// Send a request, retrying transport-level failures.
    ///
    /// Retries timeouts, connection errors, and 408/429/5xx statuses up to
    /// the configured attempt budget, replaying a clone of the request.
    /// Returns the final response regardless of status; callers decide what
    /// a non-2xx means for their endpoint. Requests with a non-replayable
    /// body are sent exactly once.
    pub(crate) async fn send_with_retry(
        &self,
        req: reqwest::RequestBuilder,
        retry_override: Option<&RetryConfig>,
    ) -> Result<reqwest::Response, AvError> {
        let cfg = retry_override.unwrap_or(&self.retry);
        let attempts = cfg.attempts();

        let mut attempt = 1u32;
        loop {
            let this_try = match req.try_clone() {
                Some(rb) => rb,
                None => return Ok(req.send().await?),
            };

            match this_try.send().await {
                Ok(resp) => {
                    let code = resp.status().as_u16();
                    let transient = matches!(code, 408 | 429 | 500..=599);
                    if !transient || attempt >= attempts {
                        return Ok(resp);
                    }
                }
                Err(e) => {
                    let transient = e.is_timeout() || e.is_connect();
                    if !transient || attempt >= attempts {
                        return Err(e.into());
                    }
                }
            }

            tokio::time::sleep(cfg.backoff.delay_for(attempt)).await;
            attempt += 1;
        }
    }
}

/* ----------------------- Builder ----------------------- */

/// Builder for [`AvClient`].
pub struct AvClientBuilder {
    user_agent: Option<String>,
    base_primary: Option<Url>,
    base_fallback: Option<Url>,
    base_lookup: Option<Url>,
    base_search: Option<Url>,
    base_verify: Option<Url>,

    retry: Option<RetryConfig>,
    max_chunks: Option<u32>,
    page_limit: Option<u32>,
    redirect_markers: Option<Vec<String>>,

    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
}

impl Default for AvClientBuilder {
    fn default() -> Self {
        Self {
            user_agent: None,
            base_primary: None,
            base_fallback: None,
            base_lookup: None,
            base_search: None,
            base_verify: None,
            retry: None,
            max_chunks: None,
            page_limit: None,
            redirect_markers: None,
            timeout: Some(Duration::from_secs(8)),
            connect_timeout: None,
        }
    }
}

impl AvClientBuilder {
    /// Override the User-Agent.
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Override the primary version-history base URL.
    #[must_use]
    pub fn base_primary(mut self, url: Url) -> Self {
        self.base_primary = Some(url);
        self
    }

    /// Override the fallback version-history base URL.
    #[must_use]
    pub fn base_fallback(mut self, url: Url) -> Self {
        self.base_fallback = Some(url);
        self
    }

    /// Override the iTunes lookup base URL.
    #[must_use]
    pub fn base_lookup(mut self, url: Url) -> Self {
        self.base_lookup = Some(url);
        self
    }

    /// Override the iTunes search base URL.
    #[must_use]
    pub fn base_search(mut self, url: Url) -> Self {
        self.base_search = Some(url);
        self
    }

    /// Override the Turnstile siteverify URL.
    #[must_use]
    pub fn base_verify(mut self, url: Url) -> Self {
        self.base_verify = Some(url);
        self
    }

    /// Set the retry policy used by default for every call. Individual
    /// builders can override it per call.
    #[must_use]
    pub fn retry_config(mut self, cfg: RetryConfig) -> Self {
        self.retry = Some(cfg);
        self
    }

    /// Cap on chunked pagination per version-history request. Default: 3.
    #[must_use]
    pub const fn max_chunks(mut self, n: u32) -> Self {
        self.max_chunks = Some(n);
        self
    }

    /// Default page size requested from the version sources. Default: 1000.
    #[must_use]
    pub const fn page_limit(mut self, n: u32) -> Self {
        self.page_limit = Some(n);
        self
    }

    /// Replace the marker substrings used to recognize an interstitial or
    /// redirect page served in place of JSON. Matched case-insensitively.
    #[must_use]
    pub fn redirect_markers(mut self, markers: Vec<String>) -> Self {
        self.redirect_markers = Some(markers);
        self
    }

    /// Set the per-attempt request timeout. Default: 8 seconds.
    #[must_use]
    pub const fn timeout(mut self, dur: Duration) -> Self {
        self.timeout = Some(dur);
        self
    }

    /// Set a connect timeout. Default: none.
    #[must_use]
    pub const fn connect_timeout(mut self, dur: Duration) -> Self {
        self.connect_timeout = Some(dur);
        self
    }

    /// Build the client.
    ///
    /// # Errors
    ///
    /// Returns an error if a base URL override cannot be parsed or the
    /// underlying HTTP client fails to initialize.
    pub fn build(self) -> Result<AvClient, AvError> {
        let base_primary = match self.base_primary {
            Some(u) => u,
            None => Url::parse(DEFAULT_BASE_PRIMARY)?,
        };
        let base_fallback = match self.base_fallback {
            Some(u) => u,
            None => Url::parse(DEFAULT_BASE_FALLBACK)?,
        };
        let base_lookup = match self.base_lookup {
            Some(u) => u,
            None => Url::parse(DEFAULT_BASE_LOOKUP)?,
        };
        let base_search = match self.base_search {
            Some(u) => u,
            None => Url::parse(DEFAULT_BASE_SEARCH)?,
        };
        let base_verify = match self.base_verify {
            Some(u) => u,
            None => Url::parse(DEFAULT_BASE_VERIFY)?,
        };

        let mut httpb =
            reqwest::Client::builder().user_agent(self.user_agent.as_deref().unwrap_or(USER_AGENT));

        if let Some(t) = self.timeout {
            httpb = httpb.timeout(t);
        }
        if let Some(ct) = self.connect_timeout {
            httpb = httpb.connect_timeout(ct);
        }

        let http = httpb.build()?;

        Ok(AvClient {
            http,
            base_primary,
            base_fallback,
            base_lookup,
            base_search,
            base_verify,
            retry: self.retry.unwrap_or_default(),
            max_chunks: self.max_chunks.unwrap_or(3),
            page_limit: self.page_limit.unwrap_or(1000),
            redirect_markers: Arc::new(
                self.redirect_markers
                    .unwrap_or_else(|| REDIRECT_MARKERS.iter().map(ToString::to_string).collect()),
            ),
        })
    }
}
