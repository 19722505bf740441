use serde::Serialize;
use thiserror::Error;

/// The primary error type for all fallible operations in this crate.
#[derive(Debug, Error)]
pub enum AvError {
    /// An error occurred during an HTTP request.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A provided URL could not be parsed.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// A request did not complete within the per-attempt timeout.
    #[error("request timed out at {url}")]
    Timeout {
        /// The URL that timed out.
        url: String,
    },

    /// The server returned an unexpected or unsuccessful HTTP status code.
    #[error("Unexpected response status: {status} at {url}")]
    Status {
        /// The HTTP status code.
        status: u16,
        /// The URL that returned the error.
        url: String,
    },

    /// The server returned an empty or whitespace-only body.
    #[error("empty response body from {url}")]
    EmptyBody {
        /// The URL that returned the empty body.
        url: String,
    },

    /// The response body could not be parsed as JSON.
    #[error("malformed response body from {url}")]
    MalformedBody {
        /// The URL that returned the malformed body.
        url: String,
    },

    /// The upstream served an interstitial/redirect page instead of data.
    /// Never retried: the source is telling us there is no real data here.
    #[error("upstream served a redirect page instead of data at {url}")]
    UpstreamRedirect {
        /// The URL that served the redirect page.
        url: String,
    },

    /// A source produced zero usable records after its retry/chunk budget.
    #[error("no version data available for app {app_id}")]
    NoData {
        /// The app the request was for.
        app_id: String,
    },

    /// The lookup endpoint had no result for the requested app.
    #[error("no app found at {url}")]
    NotFound {
        /// The lookup URL that returned zero results.
        url: String,
    },

    /// The supplied app id was not a non-empty string of ASCII digits.
    #[error("app id must be numeric, got {0:?}")]
    InvalidAppId(String),

    /// The data received from the API was in an unexpected format or was
    /// missing a required field.
    #[error("Data format unexpected or missing field: {0}")]
    Data(String),
}

impl AvError {
    /// The HTTP status a caller-facing layer should respond with.
    ///
    /// 404 when the failure indicates the app has no data to serve, 403 when
    /// the upstream answered with an interstitial page, 400 for input
    /// rejected before any network call, 500 for everything else.
    pub fn http_status(&self) -> u16 {
        match self {
            Self::NoData { .. } | Self::NotFound { .. } => 404,
            Self::Status { status: 404, .. } => 404,
            Self::UpstreamRedirect { .. } => 403,
            Self::InvalidAppId(_) => 400,
            _ => 500,
        }
    }

    /// A stable machine-readable reason string for caller-facing payloads.
    pub fn reason(&self) -> &'static str {
        match self {
            Self::Http(_) => "NETWORK_ERROR",
            Self::Url(_) => "INVALID_URL",
            Self::Timeout { .. } => "TIMEOUT",
            Self::Status { .. } => "UPSTREAM_STATUS",
            Self::EmptyBody { .. } => "EMPTY_BODY",
            Self::MalformedBody { .. } => "MALFORMED_BODY",
            Self::UpstreamRedirect { .. } => "UPSTREAM_REDIRECT",
            Self::NoData { .. } => "NO_DATA",
            Self::NotFound { .. } => "APP_NOT_FOUND",
            Self::InvalidAppId(_) => "INVALID_APP_ID",
            Self::Data(_) => "BAD_UPSTREAM_DATA",
        }
    }
}

/// Caller-facing JSON body for a total failure.
///
/// Carries a human-readable message and the stable reason code, never a
/// stack trace or transport internals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorPayload {
    /// Human-readable description of the failure.
    pub message: String,
    /// Stable machine-readable reason, e.g. `NO_DATA`.
    pub error: &'static str,
    /// The app id the request was for.
    #[serde(rename = "appId")]
    pub app_id: String,
}

impl ErrorPayload {
    /// Build the payload for an error and the app id it concerned.
    pub fn new(err: &AvError, app_id: impl Into<String>) -> Self {
        Self {
            message: err.to_string(),
            error: err.reason(),
            app_id: app_id.into(),
        }
    }
}
