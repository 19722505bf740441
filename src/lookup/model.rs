use chrono::{DateTime, Utc};
use serde::Serialize;

/// App metadata from the iTunes lookup endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AppInfo {
    /// The numeric App Store track id.
    pub track_id: i64,
    /// Display name of the app.
    pub name: String,
    /// Developer / seller name.
    pub developer: Option<String>,
    /// Current version label.
    pub version: Option<String>,
    /// The app's bundle identifier.
    pub bundle_id: Option<String>,
    /// Release notes of the current version.
    pub release_notes: Option<String>,
    /// When the app was first released.
    pub first_released: Option<DateTime<Utc>>,
    /// When the current version was released.
    pub current_version_released: Option<DateTime<Utc>>,
    /// Binary size of the current version, in bytes.
    pub file_size_bytes: Option<u64>,
    /// Average user rating, 0.0–5.0.
    pub average_rating: Option<f64>,
    /// The largest artwork URL the endpoint offered.
    pub artwork_url: Option<String>,
}

impl AppInfo {
    /// Canonical App Store page for this app.
    pub fn store_url(&self) -> String {
        format!("https://apps.apple.com/app/id{}", self.track_id)
    }
}
