//! Link URL normalization.
//!
//! Users often paste `example.com/page` without a scheme. Such input gets
//! `https://` prepended; anything that already names `http://` or `https://`
//! is kept as typed. The result must parse as an absolute http(s) URL with a
//! host, but it is stored as the (trimmed) text, not re-serialized, so
//! `http://example.com` stays exactly that.

use url::Url;

/// Maximum stored URL length, matching the `links.url` column.
pub const MAX_URL_LENGTH: usize = 2048;

/// Errors that can occur during URL normalization.
#[derive(Debug, thiserror::Error)]
pub enum UrlNormalizationError {
    #[error("URL must not be empty")]
    Empty,

    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Only HTTP and HTTPS protocols are allowed")]
    UnsupportedProtocol,

    #[error("URL must include a host")]
    MissingHost,

    #[error("URL exceeds {MAX_URL_LENGTH} characters")]
    TooLong,
}

/// Returns the scheme of `input` if it starts with `<scheme>://`.
fn explicit_scheme(input: &str) -> Option<&str> {
    let (scheme, _) = input.split_once("://")?;
    let mut chars = scheme.chars();
    let first = chars.next()?;
    let valid = first.is_ascii_alphabetic()
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
    valid.then_some(scheme)
}

/// Ensures `input` carries an http(s) scheme and is a valid absolute URL.
///
/// # Errors
///
/// Returns [`UrlNormalizationError`] for empty, oversized, unparsable or
/// host-less input, and for schemes other than http/https.
///
/// # Examples
///
/// ```
/// use sgtl_api::utils::url_normalizer::normalize_url;
///
/// assert_eq!(normalize_url("example.com/x").unwrap(), "https://example.com/x");
/// assert_eq!(normalize_url("http://example.com").unwrap(), "http://example.com");
/// ```
pub fn normalize_url(input: &str) -> Result<String, UrlNormalizationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(UrlNormalizationError::Empty);
    }

    let candidate = match explicit_scheme(trimmed) {
        Some(scheme)
            if scheme.eq_ignore_ascii_case("http") || scheme.eq_ignore_ascii_case("https") =>
        {
            trimmed.to_string()
        }
        Some(_) => return Err(UrlNormalizationError::UnsupportedProtocol),
        None => format!("https://{}", trimmed),
    };

    if candidate.chars().count() > MAX_URL_LENGTH {
        return Err(UrlNormalizationError::TooLong);
    }

    let parsed =
        Url::parse(&candidate).map_err(|e| UrlNormalizationError::InvalidFormat(e.to_string()))?;

    match parsed.scheme() {
        "http" | "https" => {}
        _ => return Err(UrlNormalizationError::UnsupportedProtocol),
    }

    if parsed.host_str().is_none_or(str::is_empty) {
        return Err(UrlNormalizationError::MissingHost);
    }

    Ok(candidate)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scheme_prepended() {
        assert_eq!(
            normalize_url("example.com/x").unwrap(),
            "https://example.com/x"
        );
    }

    #[test]
    fn test_http_kept_unchanged() {
        assert_eq!(
            normalize_url("http://example.com").unwrap(),
            "http://example.com"
        );
    }

    #[test]
    fn test_https_kept_unchanged() {
        assert_eq!(
            normalize_url("https://Example.com/Path?q=1#frag").unwrap(),
            "https://Example.com/Path?q=1#frag"
        );
    }

    #[test]
    fn test_uppercase_scheme_recognized() {
        assert_eq!(
            normalize_url("HTTPS://example.com").unwrap(),
            "HTTPS://example.com"
        );
    }

    #[test]
    fn test_whitespace_trimmed() {
        assert_eq!(
            normalize_url("  instagram.com/sgtl \n").unwrap(),
            "https://instagram.com/sgtl"
        );
    }

    #[test]
    fn test_empty_rejected() {
        assert!(matches!(
            normalize_url("   "),
            Err(UrlNormalizationError::Empty)
        ));
    }

    #[test]
    fn test_other_scheme_rejected() {
        assert!(matches!(
            normalize_url("ftp://example.com"),
            Err(UrlNormalizationError::UnsupportedProtocol)
        ));
        assert!(normalize_url("javascript:alert(1)").is_err());
    }

    #[test]
    fn test_invalid_host_rejected() {
        assert!(normalize_url("exa mple.com").is_err());
    }

    #[test]
    fn test_too_long_rejected() {
        let long = format!("example.com/{}", "a".repeat(MAX_URL_LENGTH));
        assert!(matches!(
            normalize_url(&long),
            Err(UrlNormalizationError::TooLong)
        ));
    }
}
