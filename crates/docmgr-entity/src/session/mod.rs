//! Session credential types.

pub mod token;

pub use token::{AuthTokenRequest, AuthTokenResponse, Credential};
