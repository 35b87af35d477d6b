//! `farc archive <feed.json>` – download images then render, in one step.

use anyhow::Result;
use farc_core::config::FarcConfig;
use std::path::{Path, PathBuf};

use super::{download::run_download, render::run_render};

pub fn run_archive(cfg: &FarcConfig, feed: &Path, out: Option<PathBuf>) -> Result<()> {
    let report = run_download(cfg, feed, out)?;
    run_render(&report.metadata_path)
}
