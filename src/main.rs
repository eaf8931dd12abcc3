//! head-embed CLI
//!
//! Embed another page's <head> metadata with links made absolute.

use anyhow::Result;
use clap::{Parser, Subcommand};

use head_embed::embed::{run_embed, EmbedArgs};
use head_embed::local::{run_local, LocalArgs};
use head_embed::logging::init_logging;

#[derive(Parser)]
#[command(name = "head-embed")]
#[command(author = "RoyalBit Inc.")]
#[command(version)]
#[command(about = "Embed a remote page's <head> with relative links made absolute")]
#[command(long_about = "Fetches a page, extracts its <head>, and rewrites relative <link> hrefs against the page URL.\nFailures are printed as an inline error notice instead of aborting.\n\nCommands:\n  embed   Fetch a URL and print its embeddable <head>\n  local   Same, for a saved HTML file")]
struct Cli {
    /// Verbose logging to stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch a URL and print its embeddable <head> contents
    Embed(EmbedArgs),
    /// Print the embeddable <head> contents of a saved HTML file
    Local(LocalArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Embed(args) => run_embed(args).await,
        Commands::Local(args) => run_local(args).await,
    }
}
