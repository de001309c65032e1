//! # docmgr-cli
//!
//! Terminal front end of the document manager: the login, upload, and
//! file-list views, the download sink that stands in for "save as", and the
//! `clap` command tree driving them.

pub mod commands;
pub mod output;
pub mod sink;
pub mod views;

pub use commands::Cli;
