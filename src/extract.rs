//! `<head>` region extraction from a raw payload

use crate::error::EmbedError;
use url::Url;

const OPEN_MARKER: &[u8] = b"<head>";
const CLOSE_MARKER: &[u8] = b"</head>";

/// Return the bytes strictly between `<head>` and the following `</head>`.
///
/// Markers are matched literally (case-sensitive, no attributes). The first
/// opening marker wins, and the closing marker is the first one after it.
/// A `</head>` that only appears before the opening marker does not count, so
/// `</head><head>x` fails with [`EmbedError::MissingCloseMarker`].
pub fn extract_head<'a>(source: &Url, payload: &'a [u8]) -> Result<&'a [u8], EmbedError> {
    let start = find(payload, OPEN_MARKER).ok_or_else(|| EmbedError::MissingOpenMarker {
        url: source.to_string(),
    })? + OPEN_MARKER.len();

    let end = find(&payload[start..], CLOSE_MARKER)
        .map(|offset| start + offset)
        .ok_or_else(|| EmbedError::MissingCloseMarker {
            url: source.to_string(),
        })?;

    Ok(&payload[start..end])
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://example.com/page").unwrap()
    }

    #[test]
    fn test_extract_between_markers() {
        let payload = b"<html><head><title>Hi</title></head><body></body></html>";
        let head = extract_head(&base(), payload).unwrap();
        assert_eq!(head, b"<title>Hi</title>");
    }

    #[test]
    fn test_extract_empty_head() {
        let head = extract_head(&base(), b"<head></head>").unwrap();
        assert!(head.is_empty());
    }

    #[test]
    fn test_first_occurrence_wins() {
        let payload = b"<head>a</head><head>b</head>";
        assert_eq!(extract_head(&base(), payload).unwrap(), b"a");
    }

    #[test]
    fn test_close_before_open_is_ignored() {
        let payload = b"</head><head>x</head>";
        assert_eq!(extract_head(&base(), payload).unwrap(), b"x");
    }

    #[test]
    fn test_close_only_before_open() {
        let err = extract_head(&base(), b"</head><head>x").unwrap_err();
        assert!(matches!(err, EmbedError::MissingCloseMarker { .. }));
    }

    #[test]
    fn test_missing_open() {
        let err = extract_head(&base(), b"<html></head></html>").unwrap_err();
        assert!(matches!(err, EmbedError::MissingOpenMarker { .. }));
    }

    #[test]
    fn test_missing_close() {
        let err = extract_head(&base(), b"<html><head><title>x</title>").unwrap_err();
        assert!(matches!(err, EmbedError::MissingCloseMarker { .. }));
        assert_eq!(err.url(), "https://example.com/page");
    }

    #[test]
    fn test_markers_are_case_sensitive() {
        let err = extract_head(&base(), b"<HEAD></HEAD>").unwrap_err();
        assert!(matches!(err, EmbedError::MissingOpenMarker { .. }));

        // Attributes on the opening tag are not recognised either
        let err = extract_head(&base(), b"<head lang=\"en\"></head>").unwrap_err();
        assert!(matches!(err, EmbedError::MissingOpenMarker { .. }));
    }
}
