//! Source URL normalization

use crate::error::EmbedError;
use url::{ParseError, Url};

/// Scheme applied when the caller leaves it out
pub const DEFAULT_SCHEME: &str = "https";

/// Parse a user-supplied URL, defaulting a missing scheme to https.
pub fn resolve_url(input: &str) -> Result<Url, EmbedError> {
    let invalid = |source| EmbedError::InvalidUrl {
        url: input.to_string(),
        source,
    };

    match Url::parse(input) {
        Ok(url) => Ok(url),
        Err(ParseError::RelativeUrlWithoutBase) => {
            let trimmed = input.trim();
            let candidate = if trimmed.starts_with("//") {
                format!("{}:{}", DEFAULT_SCHEME, trimmed)
            } else if trimmed.starts_with('/') {
                // Path only, nothing to use as a host
                return Err(invalid(ParseError::EmptyHost));
            } else {
                format!("{}://{}", DEFAULT_SCHEME, trimmed)
            };
            Url::parse(&candidate).map_err(invalid)
        }
        Err(e) => Err(invalid(e)),
    }
}
