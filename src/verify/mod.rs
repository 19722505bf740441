//! Turnstile token verification forwarding.
//!
//! The crate forwards the caller's token and secret to the siteverify
//! endpoint and reports the outcome; it never reads the secret from the
//! environment itself.

use serde::{Deserialize, Serialize};

use crate::core::{AvClient, AvError, RetryConfig};

/// Outcome of a siteverify call.
///
/// A failed verification is data, not an error: the caller decides what
/// status to answer with, using the codes the verifier returned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Verification {
    /// Whether the token passed verification.
    pub success: bool,
    /// Error codes reported by the verifier (e.g. `invalid-input-response`).
    pub error_codes: Vec<String>,
    /// Timestamp of the challenge, when reported.
    pub challenge_ts: Option<String>,
    /// Hostname the challenge was served on, when reported.
    pub hostname: Option<String>,
}

/// A builder for verifying a Turnstile token.
#[derive(Debug)]
pub struct VerifyBuilder {
    client: AvClient,
    secret: String,
    token: String,
    remote_ip: Option<String>,
    retry_override: Option<RetryConfig>,
}

impl VerifyBuilder {
    /// Creates a new `VerifyBuilder` from the site secret and the token the
    /// browser widget produced.
    pub fn new(client: &AvClient, secret: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            client: client.clone(),
            secret: secret.into(),
            token: token.into(),
            remote_ip: None,
            retry_override: None,
        }
    }

    /// Forward the end user's IP address to the verifier.
    #[must_use]
    pub fn remote_ip(mut self, ip: impl Into<String>) -> Self {
        self.remote_ip = Some(ip.into());
        self
    }

    /// Overrides the client's default retry policy for this call.
    #[must_use]
    pub fn retry_policy(mut self, cfg: Option<RetryConfig>) -> Self {
        self.retry_override = cfg;
        self
    }

    /// Sends the verification request.
    ///
    /// # Errors
    ///
    /// Returns `AvError` if the network request fails, the verifier answers
    /// with a non-2xx status, or the response cannot be parsed. A rejected
    /// token is an `Ok` outcome with `success: false`.
    pub async fn send(self) -> Result<Verification, AvError> {
        let url = self.client.base_verify().clone();

        let mut form: Vec<(&str, &str)> = vec![
            ("secret", self.secret.as_str()),
            ("response", self.token.as_str()),
        ];
        if let Some(ip) = &self.remote_ip {
            form.push(("remoteip", ip.as_str()));
        }

        let req = self.client.http().post(url.clone()).form(&form);
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
        let raw: SiteverifyResponse = serde_json::from_str(&body)
            .map_err(|e| AvError::Data(format!("siteverify parse error: {e}")))?;

        Ok(Verification {
            success: raw.success,
            error_codes: raw.error_codes,
            challenge_ts: raw.challenge_ts,
            hostname: raw.hostname,
        })
    }
}

/* ------------- Minimal serde mapping of /siteverify ------------- */

#[derive(Deserialize)]
struct SiteverifyResponse {
    success: bool,
    #[serde(rename = "error-codes", default)]
    error_codes: Vec<String>,
    #[serde(rename = "challenge_ts")]
    challenge_ts: Option<String>,
    hostname: Option<String>,
}
