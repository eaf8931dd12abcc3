//! embed command: fetch a page's <head> and make it embeddable
//!
//! The pipeline is resolve -> fetch -> extract -> rewrite. Any failure along
//! the way becomes an inline notice, so [`HeadEmbedder::embed`] always yields
//! markup the host page can render.

use crate::error::EmbedError;
use crate::extract::extract_head;
use crate::fetch::RemoteFetcher;
use crate::notice::render_notice;
use crate::resolve::resolve_url;
use crate::rewrite::rewrite_links;
use anyhow::{bail, Context, Result};
use clap::{Args, ValueEnum};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Client;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

#[derive(Args)]
pub struct EmbedArgs {
    /// Page whose <head> should be embedded (scheme defaults to https)
    #[arg(value_name = "URL")]
    pub url: String,

    /// Inbound request header to pass through, as "Name: value" (repeatable)
    #[arg(short = 'H', long = "header", value_name = "HEADER")]
    pub headers: Vec<String>,

    /// Timeout for the remote fetch in milliseconds (unbounded when unset)
    #[arg(long, env = "HEAD_EMBED_TIMEOUT_MS")]
    pub timeout: Option<u64>,

    /// Default User-Agent when no user-agent header is passed through
    #[arg(long, env = "HEAD_EMBED_USER_AGENT")]
    pub user_agent: Option<String>,

    /// Output format
    #[arg(long, short, value_enum, default_value = "html")]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Html,
    Json,
    Yaml,
}

/// Configuration for the embed pipeline
#[derive(Debug, Clone, Default)]
pub struct EmbedConfig {
    /// Deadline for the whole remote fetch; `None` waits indefinitely
    pub timeout: Option<Duration>,
    pub user_agent: Option<String>,
}

/// Result of one embed: the rewritten fragment or a rendered error notice
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Embed {
    Fragment(String),
    Notice(String),
}

impl Embed {
    pub fn is_fragment(&self) -> bool {
        matches!(self, Embed::Fragment(_))
    }

    pub fn as_str(&self) -> &str {
        match self {
            Embed::Fragment(markup) | Embed::Notice(markup) => markup,
        }
    }

    pub fn into_string(self) -> String {
        match self {
            Embed::Fragment(markup) | Embed::Notice(markup) => markup,
        }
    }
}

impl From<EmbedError> for Embed {
    fn from(err: EmbedError) -> Self {
        Embed::Notice(render_notice(err))
    }
}

impl From<Result<String, EmbedError>> for Embed {
    fn from(result: Result<String, EmbedError>) -> Self {
        match result {
            Ok(fragment) => Embed::Fragment(fragment),
            Err(e) => e.into(),
        }
    }
}

impl fmt::Display for Embed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Embeds remote <head> regions; cheap to clone and share between renders
#[derive(Debug, Clone)]
pub struct HeadEmbedder {
    fetcher: RemoteFetcher,
}

impl HeadEmbedder {
    pub fn new(config: EmbedConfig) -> reqwest::Result<Self> {
        let mut builder = Client::builder();
        if let Some(ua) = &config.user_agent {
            builder = builder.user_agent(ua.as_str());
        }
        let client = builder.build()?;

        Ok(Self {
            fetcher: RemoteFetcher::new(client, config.timeout),
        })
    }

    /// Run the pipeline for `url`. Never fails: errors come back as a notice.
    ///
    /// Remote response headers are copied onto `response_headers` once the
    /// remote answers, even if extraction or rewriting fails afterwards.
    pub async fn embed(
        &self,
        response_headers: &mut HeaderMap,
        request_headers: &HeaderMap,
        url: &str,
    ) -> Embed {
        self.try_embed(response_headers, request_headers, url)
            .await
            .into()
    }

    /// Same pipeline as [`HeadEmbedder::embed`] with the error left intact.
    pub async fn try_embed(
        &self,
        response_headers: &mut HeaderMap,
        request_headers: &HeaderMap,
        url: &str,
    ) -> Result<String, EmbedError> {
        let source = resolve_url(url)?;
        debug!(%source, "resolved source URL");

        let payload = self
            .fetcher
            .fetch(&source, request_headers, response_headers)
            .await?;

        embed_payload(&source, &payload)
    }
}

/// Extract and rewrite the <head> of an already fetched payload.
pub fn embed_payload(source: &Url, payload: &[u8]) -> Result<String, EmbedError> {
    let head = extract_head(source, payload)?;
    debug!(bytes = head.len(), "extracted head region");
    rewrite_links(source, head)
}

/// Printable report for json/yaml output
#[derive(Debug, Serialize)]
pub struct EmbedReport {
    pub url: String,
    pub ok: bool,
    pub markup: String,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub headers: BTreeMap<String, String>,
}

impl EmbedReport {
    pub fn new(url: &str, embed: Embed, headers: &HeaderMap) -> Self {
        let headers = headers
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();

        Self {
            url: url.to_string(),
            ok: embed.is_fragment(),
            markup: embed.into_string(),
            headers,
        }
    }

    pub fn render(&self, format: OutputFormat) -> Result<String> {
        Ok(match format {
            OutputFormat::Html => self.markup.clone(),
            OutputFormat::Json => serde_json::to_string(self)?,
            OutputFormat::Yaml => serde_yaml::to_string(self)?,
        })
    }
}

/// Run the embed command
pub async fn run_embed(args: EmbedArgs) -> Result<()> {
    let request_headers = parse_headers(&args.headers)?;

    let config = EmbedConfig {
        timeout: args.timeout.map(Duration::from_millis),
        user_agent: args.user_agent,
    };
    let embedder = HeadEmbedder::new(config).context("Failed to build HTTP client")?;

    info!(url = %args.url, "embedding head");
    let mut response_headers = HeaderMap::new();
    let embed = embedder
        .embed(&mut response_headers, &request_headers, &args.url)
        .await;

    let report = EmbedReport::new(&args.url, embed, &response_headers);
    println!("{}", report.render(args.format)?);

    Ok(())
}

/// Parse "Name: value" pairs into a header map
pub fn parse_headers(raw: &[String]) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    for line in raw {
        let Some((name, value)) = line.split_once(':') else {
            bail!("Invalid header (expected \"Name: value\"): {}", line);
        };
        let name = HeaderName::from_bytes(name.trim().as_bytes())
            .with_context(|| format!("Invalid header name: {}", line))?;
        let value = HeaderValue::from_str(value.trim())
            .with_context(|| format!("Invalid header value: {}", line))?;
        headers.append(name, value);
    }
    Ok(headers)
}
