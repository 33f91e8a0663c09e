//! Validation and normalization of URLs submitted for shortening.
//!
//! The accepted grammar is deliberately loose: `http://` or `https://`
//! followed by at least one character and no whitespace. Anything stricter is
//! left to the browser following the redirect.

use regex::Regex;
use std::sync::LazyLock;
use url::Url;

/// Compiled regex for the accepted shorten grammar.
static SHORTEN_URL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^https?://\S+$").unwrap());

/// Errors that can occur while validating a URL.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum UrlValidationError {
    #[error("Invalid URL format.")]
    InvalidFormat,

    #[error("Only HTTP and HTTPS protocols are allowed")]
    UnsupportedProtocol,
}

/// Checks the shorten grammar and upgrades a leading `http://` to `https://`.
///
/// # Errors
///
/// Returns [`UrlValidationError::InvalidFormat`] when the input does not
/// start with `http://` or `https://` or contains whitespace.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(
///     normalize_shorten_url("http://example.com/a").unwrap(),
///     "https://example.com/a"
/// );
/// assert!(normalize_shorten_url("ftp://example.com").is_err());
/// ```
pub fn normalize_shorten_url(input: &str) -> Result<String, UrlValidationError> {
    if !SHORTEN_URL_REGEX.is_match(input) {
        return Err(UrlValidationError::InvalidFormat);
    }

    match input.strip_prefix("http://") {
        Some(rest) => Ok(format!("https://{rest}")),
        None => Ok(input.to_string()),
    }
}

/// Parses an absolute HTTP(S) URL for outbound requests.
///
/// # Errors
///
/// Returns [`UrlValidationError::InvalidFormat`] for unparsable input and
/// [`UrlValidationError::UnsupportedProtocol`] for non-HTTP schemes such as
/// `file:` or `javascript:`.
pub fn parse_http_url(input: &str) -> Result<Url, UrlValidationError> {
    let url = Url::parse(input.trim()).map_err(|_| UrlValidationError::InvalidFormat)?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        _ => Err(UrlValidationError::UnsupportedProtocol),
    }
}
