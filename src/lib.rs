//! head-embed: borrow another page's <head> metadata
//!
//! Fetches a remote page, cuts out its `<head>` region, makes relative `link`
//! hrefs absolute, and returns markup ready to drop into a host page's head.
//! Failures never propagate: they render as an inline error notice.
//!
//! Commands:
//! - embed: run the pipeline against a live URL
//! - local: run extract + rewrite against a saved page

pub mod embed;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod local;
pub mod logging;
pub mod notice;
pub mod resolve;
pub mod rewrite;

pub use embed::{embed_payload, Embed, EmbedConfig, HeadEmbedder};
pub use error::EmbedError;
pub use fetch::RemoteFetcher;
pub use resolve::resolve_url;
pub use rewrite::{rewrite_links, HrefRewrite};
