//! local command: embed the <head> of a saved page
//!
//! Same extract and rewrite stages as `embed`, without the network fetch.

use crate::embed::{embed_payload, Embed, EmbedReport, OutputFormat};
use crate::resolve::resolve_url;
use anyhow::{Context, Result};
use clap::Args;
use reqwest::header::HeaderMap;
use std::path::PathBuf;
use tokio::fs;

#[derive(Args)]
pub struct LocalArgs {
    /// Saved HTML page
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// URL the page was served from; relative links resolve against it
    #[arg(long, value_name = "URL")]
    pub base: String,

    /// Output format
    #[arg(long, short, value_enum, default_value = "html")]
    pub format: OutputFormat,
}

/// Run the local command
pub async fn run_local(args: LocalArgs) -> Result<()> {
    let payload = fs::read(&args.file)
        .await
        .with_context(|| format!("Failed to read file: {}", args.file.display()))?;

    let embed = embed_local(&args.base, &payload);

    let report = EmbedReport::new(&args.base, embed, &HeaderMap::new());
    println!("{}", report.render(args.format)?);

    Ok(())
}

/// Resolve `base` and embed `payload` as if it had been fetched from there.
pub fn embed_local(base: &str, payload: &[u8]) -> Embed {
    resolve_url(base)
        .and_then(|source| embed_payload(&source, payload))
        .into()
}
