//! Backend URL construction.
//!
//! The remote REST backend lives behind a single origin and exposes two
//! path spaces: the versioned API (`/api/v1/...`) and uploaded files served
//! directly (`/static/...`). [`ApiBase`] turns caller-supplied path
//! fragments into absolute request URLs with one canonical policy:
//!
//! - the configured origin is used verbatim after stripping any scheme and
//!   trailing slashes; an empty origin falls back to [`DEFAULT_ORIGIN`]
//! - HTTPS unless the caller opted into local-development HTTP; the admin
//!   constructor never allows HTTP
//! - exactly one API prefix segment on API paths, none on static-asset
//!   paths
//! - duplicate path separators collapse to one
//! - API paths get a trailing slash (before any query string); the backend
//!   redirects when it is missing, and the extra round-trip is avoidable
//! - inputs that are already absolute URLs pass through unchanged
//! - empty input produces empty output
//!
//! Construction is pure string manipulation; there is no failure mode.

/// Versioned path segment identifying the REST API namespace.
pub const API_PREFIX: &str = "api/v1";

/// Path segment identifying directly-served uploaded files.
pub const STATIC_SEGMENT: &str = "static";

/// Fallback backend origin used when none is configured.
pub const DEFAULT_ORIGIN: &str = "reliktarte-production.up.railway.app";

/// URL scheme used to reach the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scheme {
    Http,
    Https,
}

impl Scheme {
    /// The scheme as it appears in a URL, without the `://` separator.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Http => "http",
            Self::Https => "https",
        }
    }
}

/// Backend base address: a normalized origin plus the scheme policy
/// applied to it.
///
/// Build one from configuration at startup and pass it to whatever needs
/// to construct request URLs; resolution never re-reads the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiBase {
    origin: String,
    scheme: Scheme,
}

impl ApiBase {
    /// Storefront policy: HTTPS, unless `allow_http` flags a recognized
    /// local-development context.
    #[must_use]
    pub fn new(origin: &str, allow_http: bool) -> Self {
        Self {
            origin: normalize_origin(origin),
            scheme: if allow_http { Scheme::Http } else { Scheme::Https },
        }
    }

    /// Admin policy: always HTTPS, regardless of how the origin was
    /// spelled in the environment.
    #[must_use]
    pub fn secure(origin: &str) -> Self {
        Self::new(origin, false)
    }

    /// The normalized origin (host, optionally with port; no scheme).
    #[must_use]
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// The scheme selected by this base's policy.
    #[must_use]
    pub const fn scheme(&self) -> Scheme {
        self.scheme
    }

    /// Build an absolute request URL for `path`.
    ///
    /// `path` may be `/`-prefixed or not, may already carry the API
    /// prefix, may point into the static-asset space, may carry a query
    /// string, or may already be an absolute URL (returned unchanged).
    /// Empty input yields an empty string.
    #[must_use]
    pub fn resource_url(&self, path: &str) -> String {
        if path.is_empty() {
            return String::new();
        }
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }

        let (path, query) = match path.split_once('?') {
            Some((p, q)) => (p, q),
            None => (path, ""),
        };

        // Splitting on '/' and dropping empty segments collapses duplicate
        // separators and strips leading/trailing slashes in one pass.
        let mut segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        if segments.starts_with(&["api", "v1"]) {
            segments.drain(..2);
        }

        let joined = segments.join("/");
        let mut url = format!("{}://{}", self.scheme.as_str(), self.origin);

        if segments.first() == Some(&STATIC_SEGMENT) {
            // Asset URL: no API prefix, no trailing slash.
            url.push('/');
            url.push_str(&joined);
        } else if contains_api_prefix(&segments) {
            // A prefix buried mid-path (e.g. a previously built URL fed
            // back in) must not gain a second one.
            url.push('/');
            url.push_str(&joined);
            url.push('/');
        } else {
            url.push('/');
            url.push_str(API_PREFIX);
            url.push('/');
            if !joined.is_empty() {
                url.push_str(&joined);
                url.push('/');
            }
        }

        if !query.is_empty() {
            url.push('?');
            url.push_str(query);
        }

        url
    }
}

/// Strip any scheme and trailing slashes from a configured origin,
/// falling back to [`DEFAULT_ORIGIN`] when nothing is left.
fn normalize_origin(origin: &str) -> String {
    let origin = origin.trim();
    let origin = origin
        .strip_prefix("https://")
        .or_else(|| origin.strip_prefix("http://"))
        .unwrap_or(origin);
    let origin = origin.trim_end_matches('/');

    if origin.is_empty() {
        DEFAULT_ORIGIN.to_string()
    } else {
        origin.to_string()
    }
}

/// Whether an adjacent `api/v1` pair appears anywhere in `segments`.
fn contains_api_prefix(segments: &[&str]) -> bool {
    segments.windows(2).any(|pair| pair == ["api", "v1"])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> ApiBase {
        ApiBase::new("https://example.com", false)
    }

    #[test]
    fn test_api_path_gets_prefix_and_trailing_slash() {
        assert_eq!(
            base().resource_url("product/5"),
            "https://example.com/api/v1/product/5/"
        );
    }

    #[test]
    fn test_leading_slash_is_equivalent() {
        assert_eq!(
            base().resource_url("/product/5"),
            base().resource_url("product/5")
        );
    }

    #[test]
    fn test_existing_prefix_is_not_duplicated() {
        let url = base().resource_url("api/v1/product/5");
        assert_eq!(url, "https://example.com/api/v1/product/5/");
        assert_eq!(url.matches(API_PREFIX).count(), 1);
    }

    #[test]
    fn test_exactly_one_prefix_occurrence() {
        for path in ["product/5", "/product/5", "api/v1/product/5", "/api/v1/product/5/"] {
            let url = base().resource_url(path);
            assert_eq!(url.matches(API_PREFIX).count(), 1, "path: {path}");
        }
    }

    #[test]
    fn test_duplicate_slashes_collapse() {
        let url = base().resource_url("//product///5");
        assert_eq!(url, "https://example.com/api/v1/product/5/");
    }

    #[test]
    fn test_no_double_slash_outside_scheme() {
        for path in ["product//5", "/api/v1//order", "static//images/door.png"] {
            let url = base().resource_url(path);
            let after_scheme = url.split_once("://").map_or(url.as_str(), |(_, rest)| rest);
            assert!(!after_scheme.contains("//"), "url: {url}");
        }
    }

    #[test]
    fn test_static_path_bypasses_prefix() {
        assert_eq!(
            base().resource_url("static/images/door.png"),
            "https://example.com/static/images/door.png"
        );
    }

    #[test]
    fn test_static_path_strips_existing_prefix() {
        assert_eq!(
            base().resource_url("/api/v1/static/images/door.png"),
            "https://example.com/static/images/door.png"
        );
    }

    #[test]
    fn test_static_path_has_no_trailing_slash() {
        let url = base().resource_url("static/catalog/door/photo.jpg");
        assert!(!url.ends_with('/'));
    }

    #[test]
    fn test_absolute_url_passes_through() {
        let absolute = "https://cdn.example.com/x.png";
        assert_eq!(base().resource_url(absolute), absolute);
    }

    #[test]
    fn test_empty_input_yields_empty_output() {
        assert_eq!(base().resource_url(""), "");
    }

    #[test]
    fn test_idempotent_on_own_output() {
        let first = base().resource_url("product/5");
        // Re-feed the output as a bare path (scheme stripped).
        let bare = first.trim_start_matches("https://");
        let second = base().resource_url(bare);
        assert_eq!(second.matches(API_PREFIX).count(), 1);
        let after_scheme = second
            .split_once("://")
            .map_or(second.as_str(), |(_, rest)| rest);
        assert!(!after_scheme.contains("//"));
    }

    #[test]
    fn test_absolute_output_is_fixed_point() {
        let first = base().resource_url("product/5");
        assert_eq!(base().resource_url(&first), first);
    }

    #[test]
    fn test_query_string_keeps_trailing_slash_before_it() {
        assert_eq!(
            base().resource_url("product/list?page=1&size=30"),
            "https://example.com/api/v1/product/list/?page=1&size=30"
        );
    }

    #[test]
    fn test_bare_root_path() {
        assert_eq!(base().resource_url("/"), "https://example.com/api/v1/");
    }

    #[test]
    fn test_origin_scheme_is_discarded() {
        let http_base = ApiBase::new("http://example.com/", false);
        assert_eq!(
            http_base.resource_url("product/5"),
            "https://example.com/api/v1/product/5/"
        );
    }

    #[test]
    fn test_local_development_uses_http() {
        let local = ApiBase::new("localhost:8000", true);
        assert_eq!(
            local.resource_url("product/5"),
            "http://localhost:8000/api/v1/product/5/"
        );
    }

    #[test]
    fn test_admin_policy_forces_https() {
        let admin = ApiBase::secure("http://example.com");
        assert_eq!(admin.scheme(), Scheme::Https);
        assert_eq!(
            admin.resource_url("product/5"),
            "https://example.com/api/v1/product/5/"
        );
    }

    #[test]
    fn test_empty_origin_falls_back_to_default() {
        let fallback = ApiBase::new("", false);
        assert_eq!(fallback.origin(), DEFAULT_ORIGIN);
        assert_eq!(
            fallback.resource_url("product/5"),
            format!("https://{DEFAULT_ORIGIN}/api/v1/product/5/")
        );
    }

    #[test]
    fn test_origin_trailing_slashes_trimmed() {
        let trimmed = ApiBase::new("https://example.com///", false);
        assert_eq!(trimmed.origin(), "example.com");
    }
}
