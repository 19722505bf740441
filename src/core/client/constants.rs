//! Centralized constants for default endpoints and UA.

/// Default mobile UA to avoid trivial bot blocking on the version sources.
pub(crate) const USER_AGENT: &str = concat!(
    "Mozilla/5.0 (iPhone; CPU iPhone OS 15_0 like Mac OS X) ",
    "AppleWebKit/605.1.15 (KHTML, like Gecko) ",
    "Version/15.0 Mobile/15E148 Safari/604.1"
);

/// Primary app-version source (query pairs are appended).
pub(crate) const DEFAULT_BASE_PRIMARY: &str = "https://api.timbrd.com/apple/app-version/index.php";

/// Fallback app-version source, single page only.
pub(crate) const DEFAULT_BASE_FALLBACK: &str = "https://storeios.net/api/getAppVersions";

/// iTunes metadata lookup endpoint.
pub(crate) const DEFAULT_BASE_LOOKUP: &str = "https://itunes.apple.com/lookup";

/// iTunes software search endpoint.
pub(crate) const DEFAULT_BASE_SEARCH: &str = "https://itunes.apple.com/search";

/// Cloudflare Turnstile verification endpoint.
pub(crate) const DEFAULT_BASE_VERIFY: &str =
    "https://challenges.cloudflare.com/turnstile/v0/siteverify";

/// Substrings that mark an interstitial/redirect page served in place of
/// JSON. Matched case-insensitively against unparseable bodies.
pub(crate) const REDIRECT_MARKERS: &[&str] = &["<html", "http-equiv=\"refresh\"", "window.location"];
