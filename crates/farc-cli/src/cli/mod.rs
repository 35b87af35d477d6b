//! CLI for the FARC feed archiver.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use farc_core::config::{self, FarcConfig};
use farc_core::fetch::FetchOptions;
use farc_core::retry::RetryPolicy;
use std::path::PathBuf;
use std::time::Duration;

use commands::{
    run_archive, run_capture, run_download, run_export, run_extract_posts, run_merge, run_render,
    run_status,
};

/// Top-level CLI for the FARC feed archiver.
#[derive(Debug, Parser)]
#[command(name = "farc")]
#[command(about = "FARC: capture, export and archive a personal feed", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Fetch feed API pages through the capture tap and export the result.
    Capture {
        /// Feed API URLs to fetch, in order.
        #[arg(required = true)]
        urls: Vec<String>,

        /// Directory for the exported bundle (default: current directory).
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Export a bundle from one or more raw capture-log files.
    Export {
        /// Capture log files (JSON arrays of captured responses).
        #[arg(required = true)]
        logs: Vec<PathBuf>,

        /// Directory for the exported bundle (default: current directory).
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Merge previously exported bundles into one deduplicated bundle.
    Merge {
        /// Bundle files, in precedence order (first seen wins).
        #[arg(required = true)]
        bundles: Vec<PathBuf>,

        /// Directory for the merged bundle (default: current directory).
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Download all images referenced by an exported feed file.
    Download {
        /// Exported feed file (a bundle, e.g. famly_feed_<stamp>.json).
        feed: PathBuf,

        /// Archive directory (default: derived from the feed file name).
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Generate the static HTML archive from metadata.json.
    Render {
        /// Path to metadata.json inside the archive directory.
        metadata: PathBuf,
    },

    /// Copy images used by regular posts into post_images/.
    ExtractPosts {
        /// Path to metadata.json inside the archive directory.
        metadata: PathBuf,
    },

    /// Download images and render the HTML archive in one step.
    Archive {
        /// Exported feed file (a bundle, e.g. famly_feed_<stamp>.json).
        feed: PathBuf,

        /// Archive directory (default: derived from the feed file name).
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Summarize a capture log file: responses, items, recent URLs.
    Status {
        /// Capture log file (JSON array of captured responses).
        log: PathBuf,
    },
}

/// Fetch timeouts from config.
fn fetch_options(cfg: &FarcConfig) -> FetchOptions {
    FetchOptions {
        connect_timeout: Duration::from_secs(cfg.connect_timeout_secs),
        timeout: Duration::from_secs(cfg.request_timeout_secs),
    }
}

/// Retry policy from config, or built-in defaults.
fn retry_policy(cfg: &FarcConfig) -> RetryPolicy {
    cfg.retry.as_ref().map(RetryPolicy::from).unwrap_or_default()
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    let cfg = config::load_or_init()?;
    tracing::debug!("loaded config: {:?}", cfg);

    match cli.command {
        CliCommand::Capture { urls, out } => run_capture(&cfg, &urls, out.as_deref()),
        CliCommand::Export { logs, out } => run_export(&logs, out.as_deref()),
        CliCommand::Merge { bundles, out } => run_merge(&bundles, out.as_deref()),
        CliCommand::Download { feed, out } => run_download(&cfg, &feed, out).map(|_| ()),
        CliCommand::Render { metadata } => run_render(&metadata),
        CliCommand::ExtractPosts { metadata } => run_extract_posts(&metadata),
        CliCommand::Archive { feed, out } => run_archive(&cfg, &feed, out),
        CliCommand::Status { log } => run_status(&cfg, &log),
    }
}
