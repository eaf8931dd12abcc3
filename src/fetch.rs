//! Outbound fetch of the source page
//!
//! The inbound request's headers are passed through to the remote, and the
//! remote's response headers are written onto the host's outgoing response as
//! soon as they arrive, whatever happens to the body afterwards.

use crate::error::EmbedError;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT_ENCODING, CONTENT_LENGTH, HOST};
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, instrument, warn};
use url::Url;

/// GETs source pages with header pass-through
#[derive(Debug, Clone)]
pub struct RemoteFetcher {
    client: Client,
    timeout: Option<Duration>,
}

impl RemoteFetcher {
    pub fn new(client: Client, timeout: Option<Duration>) -> Self {
        Self { client, timeout }
    }

    /// Fetch `url`, returning the full body.
    ///
    /// `response_headers` receives every header of the remote response, one
    /// comma-joined value per name, replacing what was there.
    ///
    /// `request_headers` are forwarded as-is except `Host`, `Content-Length`
    /// and `Accept-Encoding`, which are dropped. The client still adds its own
    /// `Accept` (and `User-Agent`, when configured) if none is forwarded.
    #[instrument(skip_all, fields(url = %url))]
    pub async fn fetch(
        &self,
        url: &Url,
        request_headers: &HeaderMap,
        response_headers: &mut HeaderMap,
    ) -> Result<Vec<u8>, EmbedError> {
        // These describe the host's own connection, not the remote one. The
        // body must arrive identity-encoded to be searched for markers.
        let mut forwarded = request_headers.clone();
        for name in [HOST, CONTENT_LENGTH, ACCEPT_ENCODING] {
            forwarded.remove(name);
        }

        let mut builder = self.client.get(url.clone()).headers(forwarded);
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        let request = builder.build().map_err(|source| EmbedError::RequestBuild {
            url: url.to_string(),
            source,
        })?;

        let response = self
            .client
            .execute(request)
            .await
            .map_err(|source| EmbedError::Transport {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if status.is_success() {
            debug!(%status, "remote responded");
        } else {
            warn!(%status, "remote responded with non-success status");
        }

        copy_headers(response.headers(), response_headers);

        let body = response.bytes().await.map_err(|source| EmbedError::BodyRead {
            url: url.to_string(),
            source,
        })?;
        debug!(bytes = body.len(), "read remote body");

        Ok(body.to_vec())
    }
}

/// Copy `from` onto `to`, joining multi-valued headers with commas.
pub fn copy_headers(from: &HeaderMap, to: &mut HeaderMap) {
    for name in from.keys() {
        let joined = from
            .get_all(name)
            .iter()
            .map(HeaderValue::as_bytes)
            .collect::<Vec<_>>()
            .join(&b","[..]);

        match HeaderValue::from_bytes(&joined) {
            Ok(value) => {
                to.insert(name.clone(), value);
            }
            Err(e) => warn!(header = %name, error = %e, "skipping unrepresentable header"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_copy_headers_joins_and_overwrites() {
        let mut from = HeaderMap::new();
        from.append("x-multi", HeaderValue::from_static("a"));
        from.append("x-multi", HeaderValue::from_static("b"));
        from.insert("cache-control", HeaderValue::from_static("max-age=60"));

        let mut to = HeaderMap::new();
        to.append("x-multi", HeaderValue::from_static("old1"));
        to.append("x-multi", HeaderValue::from_static("old2"));
        to.insert("x-host-only", HeaderValue::from_static("kept"));

        copy_headers(&from, &mut to);

        let multi: Vec<_> = to.get_all("x-multi").iter().collect();
        assert_eq!(multi, vec![&HeaderValue::from_static("a,b")]);
        assert_eq!(to["cache-control"], "max-age=60");
        assert_eq!(to["x-host-only"], "kept");
    }

    #[test]
    fn test_copy_headers_empty_source() {
        let mut to = HeaderMap::new();
        to.insert("x-a", HeaderValue::from_static("1"));
        copy_headers(&HeaderMap::new(), &mut to);
        assert_eq!(to.len(), 1);
    }
}
