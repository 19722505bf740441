use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::core::AvError;

/// A validated App Store track id: a non-empty string of ASCII digits.
///
/// Upstream ids can exceed `u32` and are only ever forwarded verbatim, so
/// the digits are kept as a string rather than parsed into an integer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct AppId(String);

impl AppId {
    /// The id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Pull an app id out of free-form input: a bare numeric string, an App
    /// Store URL containing `/id{digits}`, or any URL with an `id={digits}`
    /// query parameter.
    ///
    /// Returns `None` when no id can be found.
    pub fn extract(input: &str) -> Option<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return None;
        }
        if trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return Some(Self(trimmed.to_string()));
        }

        let lower = trimmed.to_ascii_lowercase();
        for (idx, pat) in lower.match_indices("/id") {
            let digits = leading_digits(&trimmed[idx + pat.len()..]);
            if !digits.is_empty() {
                return Some(Self(digits.to_string()));
            }
        }
        for pat in ["?id=", "&id="] {
            if let Some(idx) = lower.find(pat) {
                let digits = leading_digits(&trimmed[idx + pat.len()..]);
                if !digits.is_empty() {
                    return Some(Self(digits.to_string()));
                }
            }
        }
        None
    }
}

fn leading_digits(s: &str) -> &str {
    let end = s
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(s.len());
    &s[..end]
}

impl FromStr for AppId {
    type Err = AvError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return Err(AvError::InvalidAppId(s.to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }
}

impl fmt::Display for AppId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
