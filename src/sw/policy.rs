//! Cache Policy
//!
//! Pure decisions for the service worker: what to precache, what to
//! intercept, what may enter the cache, and which buckets to delete on
//! a version bump. Cache hits are never revalidated; invalidation is
//! the version-name bump alone.

/// Versioned cache bucket name. Bump the suffix to invalidate every
/// cached asset on the next deploy.
pub const CACHE_NAME: &str = "pocket-dash-cache-v1";

/// Static assets precached at install time, all-or-nothing. Trunk
/// fingerprints the page bundle filenames, so script and wasm assets
/// enter the cache through the write-after-miss path instead.
pub const STATIC_ASSETS: &[&str] = &[
    "/",
    "/index.html",
    "/styles.css",
    "/manifest.webmanifest",
    "/icons/icon-192.png",
    "/icons/icon-512.png",
];

/// Requests whose path contains this segment stay on the network
pub const API_PATH_MARKER: &str = "/api/";

/// Cached document served when an HTML navigation fails offline
pub const OFFLINE_DOCUMENT: &str = "/index.html";

/// Whether the worker should handle a request at all. Cross-origin
/// traffic and API calls pass through to default browser handling.
pub fn should_intercept(scope_origin: &str, request_origin: &str, path: &str) -> bool {
    request_origin == scope_origin && !path.contains(API_PATH_MARKER)
}

/// Whether a network response may populate the cache
pub fn is_cacheable(method: &str, status: u16, response_type: &str) -> bool {
    method == "GET" && status == 200 && response_type == "basic"
}

/// Bucket names to delete on activation: everything but the current
/// version
pub fn stale_caches(existing: &[String]) -> Vec<String> {
    existing
        .iter()
        .filter(|name| name.as_str() != CACHE_NAME)
        .cloned()
        .collect()
}

/// Offline fallback target for a failed fetch, if any. Only HTML
/// documents fall back to the cached root document; other resources
/// simply fail to load.
pub fn offline_fallback(path: &str) -> Option<&'static str> {
    if path == "/" || path.ends_with(".html") {
        Some(OFFLINE_DOCUMENT)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intercepts_same_origin_only() {
        let scope = "https://dash.example";
        assert!(should_intercept(scope, "https://dash.example", "/styles.css"));
        assert!(!should_intercept(scope, "https://api.openweathermap.org", "/data/2.5/weather"));
    }

    #[test]
    fn test_api_paths_pass_through() {
        let scope = "https://dash.example";
        assert!(!should_intercept(scope, scope, "/api/weather"));
        assert!(should_intercept(scope, scope, "/apidocs.html"));
    }

    #[test]
    fn test_cacheable_requires_get_200_basic() {
        assert!(is_cacheable("GET", 200, "basic"));
        assert!(!is_cacheable("POST", 200, "basic"));
        assert!(!is_cacheable("GET", 404, "basic"));
        assert!(!is_cacheable("GET", 200, "opaque"));
    }

    #[test]
    fn test_version_bump_deletes_old_buckets() {
        // A deploy that bumped v1 to the current version leaves both
        // buckets behind; only the current one may survive activation.
        let existing = vec![
            "pocket-dash-cache-v0".to_string(),
            CACHE_NAME.to_string(),
            "unrelated-cache".to_string(),
        ];
        let stale = stale_caches(&existing);
        assert_eq!(stale, vec!["pocket-dash-cache-v0", "unrelated-cache"]);
    }

    #[test]
    fn test_only_current_bucket_is_kept() {
        let existing = vec![CACHE_NAME.to_string()];
        assert!(stale_caches(&existing).is_empty());
    }

    #[test]
    fn test_offline_fallback_only_for_documents() {
        assert_eq!(offline_fallback("/"), Some("/index.html"));
        assert_eq!(offline_fallback("/index.html"), Some("/index.html"));
        assert_eq!(offline_fallback("/styles.css"), None);
        assert_eq!(offline_fallback("/icons/icon-192.png"), None);
    }

    #[test]
    fn test_manifest_includes_offline_document() {
        // The fallback only works if the document was precached
        assert!(STATIC_ASSETS.contains(&OFFLINE_DOCUMENT));
    }
}
