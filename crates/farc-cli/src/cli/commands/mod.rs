//! CLI command handlers. Each command is in its own file for clarity.

mod archive;
mod capture;
mod download;
mod export;
mod extract_posts;
mod merge;
mod render;
mod status;

pub use archive::run_archive;
pub use capture::run_capture;
pub use download::run_download;
pub use export::run_export;
pub use extract_posts::run_extract_posts;
pub use merge::run_merge;
pub use render::run_render;
pub use status::run_status;
