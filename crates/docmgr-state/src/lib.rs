//! # docmgr-state
//!
//! Client-side state of the document manager:
//!
//! - **token**: durable key-value stores for the session credential
//! - **session**: the [`SessionStore`], single source of truth for authentication
//! - **registry**: the [`FileRegistry`], last fetched snapshot plus its status
//! - **context**: [`AppContext`], which wires the two together over a gateway
//!
//! All mutation goes through the owning component's methods; views only
//! read state and dispatch intents.

pub mod context;
pub mod observer;
pub mod registry;
pub mod session;
pub mod status;
pub mod token;

#[cfg(test)]
mod testing;

pub use context::AppContext;
pub use observer::UploadObserver;
pub use registry::{FileRegistry, RefreshOutcome};
pub use session::SessionStore;
pub use status::OperationStatus;
