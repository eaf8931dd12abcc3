//! Pipeline error taxonomy
//!
//! Every variant names the URL it was raised for. None of these ever reach the
//! caller of [`crate::HeadEmbedder::embed`]; they are rendered as a notice.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EmbedError {
    #[error("failed to parse URL {url}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("failed to create request to URL {url}")]
    RequestBuild {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to GET URL {url}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to read body from URL {url}")]
    BodyRead {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("opening <head> tag not present in payload from URL {url}")]
    MissingOpenMarker { url: String },

    #[error("closing </head> tag not present in payload from URL {url}")]
    MissingCloseMarker { url: String },

    #[error("failed to parse <head> contents from URL {url}: {reason}")]
    FragmentParse { url: String, reason: String },

    #[error("failed to serialize <head> contents from URL {url}: {reason}")]
    Serialization { url: String, reason: String },
}

impl EmbedError {
    /// URL the failing stage was working on
    pub fn url(&self) -> &str {
        match self {
            EmbedError::InvalidUrl { url, .. }
            | EmbedError::RequestBuild { url, .. }
            | EmbedError::Transport { url, .. }
            | EmbedError::BodyRead { url, .. }
            | EmbedError::MissingOpenMarker { url }
            | EmbedError::MissingCloseMarker { url }
            | EmbedError::FragmentParse { url, .. }
            | EmbedError::Serialization { url, .. } => url,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_url() {
        let err = EmbedError::MissingCloseMarker {
            url: "https://example.com/".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "closing </head> tag not present in payload from URL https://example.com/"
        );
        assert_eq!(err.url(), "https://example.com/");
    }

    #[test]
    fn test_invalid_url_keeps_source() {
        let err = EmbedError::InvalidUrl {
            url: "http://[::1".to_string(),
            source: url::ParseError::InvalidIpv6Address,
        };
        let source = std::error::Error::source(&err).map(|s| s.to_string());
        assert_eq!(source, Some("invalid IPv6 address".to_string()));
    }
}
