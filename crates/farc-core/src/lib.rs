pub mod config;
pub mod logging;

pub mod capture;
pub mod downloader;
pub mod export;
pub mod extract;
pub mod feed;
pub mod fetch;
pub mod intercept;
pub mod naming;
pub mod render;
pub mod retry;
