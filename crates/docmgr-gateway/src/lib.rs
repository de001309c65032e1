//! # docmgr-gateway
//!
//! Client-side gateway to the document management REST API. Four remote
//! operations (authenticate, list, download, upload) plus single-record
//! lookup sit behind the [`DocumentGateway`] trait so the state layer can be
//! exercised against a fake. [`HttpGateway`] is the `reqwest` implementation.
//!
//! Gateway calls never mutate client state, never retry, and carry no
//! explicit timeout.

pub mod error;
pub mod gateway;
pub mod http;

pub use error::GatewayError;
pub use gateway::{DocumentGateway, ListFilter};
pub use http::HttpGateway;
