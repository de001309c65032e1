//! # docmgr-core
//!
//! Core crate for the document manager client. Contains the seam traits
//! (durable token storage, download sinks), configuration schemas, and the
//! unified error system.
//!
//! This crate has **no** internal dependencies on other docmgr crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;

pub use error::AppError;
pub use result::AppResult;
