//! # docmgr-entity
//!
//! Domain value types for the document manager client. Every struct in this
//! crate mirrors a payload exchanged with the document backend or a value
//! the client holds on behalf of the user (the session credential).

pub mod file;
pub mod session;
