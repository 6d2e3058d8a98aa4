use std::path::PathBuf;

use clap::Parser;

/// Paste a URL, get a digest back from a Vibe Digest server.
#[derive(Debug, Clone, Default, Parser)]
#[command(version, about)]
pub struct Cli {
    /// Base URL of the summarization server.
    #[arg(long, env = "VIBE_DIGEST_SERVER")]
    pub server: Option<String>,

    /// Config file (RON). Defaults to ./vibe_digest.ron when present.
    #[arg(long, short)]
    pub config: Option<PathBuf>,

    /// URL to prefill, or to summarize with --once.
    #[arg(long, short)]
    pub url: Option<String>,

    /// Summarize --url once, print the result and exit.
    #[arg(long, requires = "url")]
    pub once: bool,

    /// Show summaries as raw text instead of structured.
    #[arg(long)]
    pub plain: bool,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Print the effective configuration and exit.
    #[arg(long)]
    pub print_config: bool,
}
