//! File version records and upload payloads.

pub mod upload;
pub mod version;

pub use upload::{UploadAck, UploadFile};
pub use version::FileVersionRecord;
