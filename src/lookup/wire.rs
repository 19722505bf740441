use serde::Deserialize;

#[derive(Deserialize)]
pub(crate) struct LookupEnvelope {
    #[serde(rename = "resultCount")]
    #[allow(dead_code)]
    pub(crate) result_count: Option<u32>,
    pub(crate) results: Option<Vec<RawAppInfo>>,
}

/// iTunes lookup/search result. Only the fields we project are listed;
/// everything else in the (large) payload is ignored.
#[derive(Deserialize)]
pub(crate) struct RawAppInfo {
    #[serde(rename = "trackId")]
    pub(crate) track_id: Option<i64>,
    #[serde(rename = "trackName")]
    pub(crate) track_name: Option<String>,
    #[serde(rename = "artistName")]
    pub(crate) artist_name: Option<String>,
    pub(crate) version: Option<String>,
    #[serde(rename = "bundleId")]
    pub(crate) bundle_id: Option<String>,
    #[serde(rename = "releaseNotes")]
    pub(crate) release_notes: Option<String>,
    #[serde(rename = "releaseDate")]
    pub(crate) release_date: Option<String>,
    #[serde(rename = "currentVersionReleaseDate")]
    pub(crate) current_version_release_date: Option<String>,
    // iTunes serializes the byte count as a JSON string.
    #[serde(rename = "fileSizeBytes")]
    pub(crate) file_size_bytes: Option<String>,
    #[serde(rename = "averageUserRating")]
    pub(crate) average_user_rating: Option<f64>,
    #[serde(rename = "artworkUrl60")]
    pub(crate) artwork_url_60: Option<String>,
    #[serde(rename = "artworkUrl100")]
    pub(crate) artwork_url_100: Option<String>,
    #[serde(rename = "artworkUrl512")]
    pub(crate) artwork_url_512: Option<String>,
}
