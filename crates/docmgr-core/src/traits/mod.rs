//! Seam traits defined in `docmgr-core` and implemented by other crates.

pub mod download;
pub mod token_store;

pub use download::DownloadSink;
pub use token_store::TokenStore;
